use std::future::Future;

use leptos::logging::warn;
use thiserror::Error;

use crate::models::{Page, PageRequest, Repository};
use crate::state::{SearchOutcome, SearchTicket};

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid search query.")]
    InvalidQuery,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("Registry API error: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Backend that performs the actual repository search.
pub trait SearchService {
    fn search(
        &self,
        query: &str,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<Repository>, SearchError>>;
}

/// Runs one ticket and tags the result with the ticket's sequence number.
pub async fn execute<S: SearchService>(service: &S, ticket: SearchTicket) -> SearchOutcome {
    let result = service.search(&ticket.query, ticket.request).await;
    SearchOutcome {
        seq: ticket.seq,
        result,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpSearchService {
    base_url: String,
}

impl HttpSearchService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(&self, query: &str, request: PageRequest) -> String {
        format!(
            "{}/repositories/search?q={}&page={}&size={}",
            self.base_url,
            urlencoding(query),
            request.page,
            request.size
        )
    }
}

impl SearchService for HttpSearchService {
    async fn search(
        &self,
        query: &str,
        request: PageRequest,
    ) -> Result<Page<Repository>, SearchError> {
        let url = self.search_url(query, request);

        let response = reqwasm::http::Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SearchError::Request(format!("{:?}", e)))?;

        if let Some(err) = status_error(response.status()) {
            warn!("search {} returned {}", url, response.status());
            return Err(err);
        }

        response
            .json::<Page<Repository>>()
            .await
            .map_err(|e| SearchError::Decode(format!("{:?}", e)))
    }
}

fn status_error(status: u16) -> Option<SearchError> {
    match status {
        200..=299 => None,
        400 => Some(SearchError::InvalidQuery),
        429 => Some(SearchError::RateLimited),
        code => Some(SearchError::Status(code)),
    }
}

pub fn urlencoding(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeService {
        calls: RefCell<Vec<(String, PageRequest)>>,
        reply: Result<Page<Repository>, SearchError>,
    }

    impl SearchService for FakeService {
        fn search(
            &self,
            query: &str,
            request: PageRequest,
        ) -> impl Future<Output = Result<Page<Repository>, SearchError>> {
            self.calls.borrow_mut().push((query.to_string(), request));
            std::future::ready(self.reply.clone())
        }
    }

    fn empty_page() -> Page<Repository> {
        Page {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            number: 0,
            size: 8,
            first: true,
            last: true,
            empty: true,
        }
    }

    #[test]
    fn test_search_url() {
        let service = HttpSearchService::new("http://localhost:8080/api/");
        let url = service.search_url("my app", PageRequest { page: 2, size: 8 });
        assert_eq!(
            url,
            "http://localhost:8080/api/repositories/search?q=my%20app&page=2&size=8"
        );
    }

    #[test]
    fn test_urlencoding() {
        assert_eq!(urlencoding("library/nginx"), "library%2Fnginx");
        assert_eq!(urlencoding("a&b=c"), "a%26b%3Dc");
        assert_eq!(urlencoding("ü"), "%C3%BC");
        assert_eq!(urlencoding("plain-name_1.0~x"), "plain-name_1.0~x");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_error(200), None);
        assert_eq!(status_error(204), None);
        assert_eq!(status_error(400), Some(SearchError::InvalidQuery));
        assert_eq!(status_error(429), Some(SearchError::RateLimited));
        assert_eq!(status_error(500), Some(SearchError::Status(500)));
    }

    #[test]
    fn test_execute_forwards_ticket() {
        let service = FakeService {
            calls: RefCell::new(Vec::new()),
            reply: Ok(empty_page()),
        };
        let ticket = SearchTicket {
            seq: 4,
            query: "rust".to_string(),
            request: PageRequest { page: 1, size: 8 },
        };

        let outcome = futures::executor::block_on(execute(&service, ticket));

        assert_eq!(outcome.seq, 4);
        assert_eq!(outcome.result, Ok(empty_page()));
        assert_eq!(
            service.calls.borrow().as_slice(),
            &[("rust".to_string(), PageRequest { page: 1, size: 8 })]
        );
    }

    #[test]
    fn test_execute_carries_error() {
        let service = FakeService {
            calls: RefCell::new(Vec::new()),
            reply: Err(SearchError::RateLimited),
        };
        let ticket = SearchTicket {
            seq: 1,
            query: "x".to_string(),
            request: PageRequest { page: 0, size: 8 },
        };

        let outcome = futures::executor::block_on(execute(&service, ticket));
        assert_eq!(outcome.result, Err(SearchError::RateLimited));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(SearchError::Status(503).to_string(), "Registry API error: 503");
        assert_eq!(
            SearchError::RateLimited.to_string(),
            "Too many requests. Please try again later."
        );
    }
}
