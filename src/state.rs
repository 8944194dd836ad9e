//! Search results state: the active query, the current page of results and
//! the pagination cursor.
//!
//! Every operation that needs the backend returns a [`SearchTicket`]. The
//! caller runs it (see [`crate::api::execute`]) and hands the resulting
//! [`SearchOutcome`] back to [`SearchResultsState::apply`]. Only the outcome of
//! the most recently issued ticket is applied.

use leptos::logging::{error, log};

use crate::api::SearchError;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::models::{Page, PageEvent, PageRequest, Repository};
use crate::query::QueryListener;

#[derive(Clone, Debug, PartialEq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
    pub request: PageRequest,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub seq: u64,
    pub result: Result<Page<Repository>, SearchError>,
}

#[derive(Clone, Debug)]
pub struct SearchResultsState {
    pub query: String,
    pub repos: Vec<Repository>,
    pub page_info: Option<Page<Repository>>,
    pub loading: bool,
    pub current_page: u32,
    pub page_size: u32,
    pub error: Option<SearchError>,
    listener: QueryListener,
    seq: u64,
}

impl Default for SearchResultsState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SearchResultsState {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: String::new(),
            repos: Vec::new(),
            page_info: None,
            loading: false,
            current_page: 0,
            page_size: page_size.max(1),
            error: None,
            listener: QueryListener::default(),
            seq: 0,
        }
    }

    /// Feeds one value of the `q` parameter. A new distinct term restarts the
    /// listing at page 0.
    pub fn on_query(&mut self, value: Option<String>) -> Option<SearchTicket> {
        let q = self.listener.observe(value)?;
        self.query = q;
        self.current_page = 0;
        Some(self.begin_search(0, self.page_size))
    }

    pub fn begin_search(&mut self, page: u32, size: u32) -> SearchTicket {
        self.repos.clear();
        self.error = None;
        self.loading = true;
        self.seq += 1;

        log!("search {:?} page={} size={} (#{})", self.query, page, size, self.seq);

        SearchTicket {
            seq: self.seq,
            query: self.query.clone(),
            request: PageRequest { page, size },
        }
    }

    /// Applies a finished search. Returns `false` when the outcome belongs to
    /// a superseded ticket and was dropped.
    pub fn apply(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.seq != self.seq {
            log!("dropping stale search result #{} (latest #{})", outcome.seq, self.seq);
            return false;
        }

        match outcome.result {
            Ok(page) => {
                self.repos = page.content.clone();
                self.page_info = Some(page);
            }
            Err(e) => {
                error!("search {:?} failed: {}", self.query, e);
                self.error = Some(e);
            }
        }
        self.loading = false;
        true
    }

    pub fn previous_page(&mut self) -> Option<SearchTicket> {
        if self.current_page == 0 {
            return None;
        }
        self.current_page -= 1;
        Some(self.begin_search(self.current_page, self.page_size))
    }

    pub fn next_page(&mut self) -> Option<SearchTicket> {
        let total_pages = self.page_info.as_ref()?.total_pages;
        if self.current_page >= total_pages.saturating_sub(1) {
            return None;
        }
        self.current_page += 1;
        Some(self.begin_search(self.current_page, self.page_size))
    }

    // Neither of these starts a search; the next navigation picks the new
    // values up.
    pub fn on_page_size_change(&mut self, size: u32) {
        self.page_size = size.max(1);
        self.current_page = 0;
    }

    pub fn on_page_change(&mut self, event: PageEvent) {
        self.current_page = event.page;
        self.page_size = event.rows.max(1);
    }

    pub fn total_pages(&self) -> u32 {
        self.page_info.as_ref().map_or(0, |p| p.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages().saturating_sub(1)
    }

    pub fn page_label(&self) -> String {
        match self.total_pages() {
            0 => "No pages".to_string(),
            total => format!("Page {} of {}", self.current_page.saturating_add(1), total),
        }
    }
}
