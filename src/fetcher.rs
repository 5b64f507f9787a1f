//! HTTP access for the scrapers.
//!
//! One [`HttpFetcher`] is built per run and handed by reference to every
//! scraper. It presents itself as a desktop Chrome on Windows, which keeps
//! the bookstore's bot filter and Google News from serving challenge pages.
//!
//! Scrapers only depend on the [`Fetch`] trait, so tests can swap in a stub
//! that serves canned bodies.
//!
//! # Failure model
//!
//! Every call makes exactly one attempt. Failures come back as a
//! [`FetchError`]; it is the scraper's job to log it and carry on with an
//! empty result.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Ways a single fetch can fail.
#[derive(Debug)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure.
    Transport(reqwest::Error),
    /// The server answered with a non-success status.
    Status { url: String, status: StatusCode },
    /// The body arrived but does not have the expected shape.
    Payload(String),
    /// The body arrived but was blank.
    Empty { url: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "transport error: {e}"),
            FetchError::Status { url, status } => write!(f, "{url} answered {status}"),
            FetchError::Payload(msg) => write!(f, "unexpected payload: {msg}"),
            FetchError::Empty { url } => write!(f, "{url} returned an empty body"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Payload(e.to_string())
    }
}

/// Something that can GET a URL and hand back the body as text.
pub trait Fetch {
    /// Fetch `url` once. Non-success statuses and blank bodies are errors.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// The run's HTTP client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build the client with browser-like identity headers and a timeout.
    pub fn new() -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,application/json;q=0.8,*/*;q=0.7",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ar,en;q=0.8,fr;q=0.6"));

        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched body"
        );
        if body.trim().is_empty() {
            return Err(FetchError::Empty {
                url: url.to_string(),
            });
        }
        Ok(body)
    }
}

/// Canned responses for scraper tests.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Serves fixed bodies by URL. Unknown URLs answer 404.
    #[derive(Debug, Default)]
    pub struct StubFetcher {
        bodies: HashMap<String, String>,
    }

    impl StubFetcher {
        pub fn with(mut self, url: &str, body: &str) -> Self {
            self.bodies.insert(url.to_string(), body.to_string());
            self
        }
    }

    impl Fetch for StubFetcher {
        async fn get_text(&self, url: &str) -> Result<String, FetchError> {
            match self.bodies.get(url) {
                Some(body) if body.trim().is_empty() => Err(FetchError::Empty {
                    url: url.to_string(),
                }),
                Some(body) => Ok(body.clone()),
                None => Err(FetchError::Status {
                    url: url.to_string(),
                    status: StatusCode::NOT_FOUND,
                }),
            }
        }
    }
}
