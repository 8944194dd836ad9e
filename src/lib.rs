use leptos::prelude::*;
use leptos_meta::provide_meta_context;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

pub mod api;
pub mod components;
pub mod config;
pub mod format;
pub mod models;
pub mod query;
pub mod state;

use components::{HomePage, SearchResults};
use config::SearchConfig;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(SearchConfig::load());

    view! {
        <Router>
            <Routes fallback=|| "Page not found">
                <Route path=path!("/") view=HomePage />
                <Route path=path!("/search") view=SearchResults />
            </Routes>
        </Router>
    }
}
