use leptos::logging::warn;
use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u32 = 8;
pub const PAGE_SIZE_OPTIONS: &[u32] = &[8, 16, 32];

/// Runtime settings for the search page.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub page_size_options: Vec<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
        }
    }
}

impl SearchConfig {
    /// Loads the JSON embedded at build time through `REGISTRY_SEARCH_CONFIG`,
    /// falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(option_env!("REGISTRY_SEARCH_CONFIG"))
    }

    fn load_from(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                warn!("ignoring invalid REGISTRY_SEARCH_CONFIG: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: SearchConfig = serde_json::from_str(json)?;
        if config.page_size == 0 {
            config.page_size = DEFAULT_PAGE_SIZE;
        }
        config.page_size_options.retain(|size| *size > 0);
        if config.page_size_options.is_empty() {
            config.page_size_options = PAGE_SIZE_OPTIONS.to_vec();
        }
        Ok(config)
    }
}

fn default_api_base_url() -> String {
    if let Some(url) = option_env!("REGISTRY_API_URL") {
        return url.trim_end_matches('/').to_string();
    }
    window_origin()
        .map(|origin| format!("{}/api", origin))
        .unwrap_or_else(|| "/api".to_string())
}

#[cfg(target_arch = "wasm32")]
fn window_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn window_origin() -> Option<String> {
    None
}
