//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the descriptive user agent and `Accept` header
//! - Per-request timeouts and redirect caps (seed and page profiles)
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// `Accept` header sent with every request
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Transport failures, classified for persistence as error text
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Too many redirects (limit {0})")]
    RedirectLimit(usize),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Timeout and redirect cap applied to one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchProfile {
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl FetchProfile {
    /// Profile for the homepage fetch
    pub fn seed(config: &CrawlerConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.seed_timeout_secs),
            max_redirects: config.seed_max_redirects,
        }
    }

    /// Profile for every other page
    pub fn page(config: &CrawlerConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.page_timeout_secs),
            max_redirects: config.page_max_redirects,
        }
    }
}

/// A successfully fetched (2xx) document
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub status_code: u16,
    pub body: String,
    pub headers: HeaderMap,
    /// URL after redirects
    pub final_url: String,
}

impl FetchedDocument {
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// HTTP transport with the user agent fixed on the client
///
/// reqwest binds the redirect policy to the client, so one client is kept
/// per configured redirect cap; they share nothing but their settings.
#[derive(Debug, Clone)]
pub struct Fetcher {
    user_agent: String,
    clients: Vec<(usize, Client)>,
}

impl Fetcher {
    /// Builds a fetcher with clients for the seed and page profiles
    ///
    /// # Example
    ///
    /// ```
    /// use site_seed::config::Config;
    /// use site_seed::crawler::Fetcher;
    ///
    /// let config = Config::default();
    /// let fetcher = Fetcher::new(&config.user_agent, &config.crawler).unwrap();
    /// assert!(fetcher.user_agent().starts_with("SiteSeed/"));
    /// ```
    pub fn new(user_agent: &UserAgentConfig, config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let user_agent = user_agent.header_value();

        let mut clients = Vec::new();
        for max_redirects in [config.seed_max_redirects, config.page_max_redirects] {
            if !clients.iter().any(|(cap, _)| *cap == max_redirects) {
                clients.push((max_redirects, build_http_client(&user_agent, max_redirects)?));
            }
        }

        Ok(Self {
            user_agent,
            clients,
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Fetches `url` with the given profile
    ///
    /// Only 2xx responses with a readable body succeed; everything else maps
    /// to a [`FetchError`].
    pub async fn get(&self, url: &str, profile: FetchProfile) -> Result<FetchedDocument, FetchError> {
        let client = self.client_for(profile.max_redirects)?;

        let response = client
            .get(url)
            .timeout(profile.timeout)
            .send()
            .await
            .map_err(|e| classify_error(e, profile))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(profile.timeout)
            } else {
                FetchError::Body(e.to_string())
            }
        })?;

        Ok(FetchedDocument {
            status_code: status.as_u16(),
            body,
            headers,
            final_url,
        })
    }

    fn client_for(&self, max_redirects: usize) -> Result<Client, FetchError> {
        if let Some((_, client)) = self.clients.iter().find(|(cap, _)| *cap == max_redirects) {
            return Ok(client.clone());
        }
        build_http_client(&self.user_agent, max_redirects)
            .map_err(|e| FetchError::Request(e.to_string()))
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Full `User-Agent` header value
/// * `max_redirects` - Redirects followed before the request fails
pub fn build_http_client(user_agent: &str, max_redirects: usize) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

    Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

fn classify_error(error: reqwest::Error, profile: FetchProfile) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(profile.timeout)
    } else if error.is_redirect() {
        FetchError::RedirectLimit(profile.max_redirects)
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, headers, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile(timeout_ms: u64, max_redirects: usize) -> FetchProfile {
        FetchProfile {
            timeout: Duration::from_millis(timeout_ms),
            max_redirects,
        }
    }

    fn fetcher() -> Fetcher {
        let user_agent = UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        };
        Fetcher::new(&user_agent, &CrawlerConfig::default()).unwrap()
    }

    #[test]
    fn test_profiles_from_config() {
        let config = CrawlerConfig::default();
        assert_eq!(FetchProfile::seed(&config), profile(30_000, 5));
        assert_eq!(FetchProfile::page(&config), profile(20_000, 3));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FetchError::Status(500).to_string(), "HTTP 500");
        assert_eq!(
            FetchError::Timeout(Duration::from_secs(20)).to_string(),
            "Request timed out after 20s"
        );
    }

    #[tokio::test]
    async fn test_get_sends_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("user-agent", "TestCrawler/1.0 (+https://example.com/bot)"))
            // Comma-separated header values are matched item by item
            .and(headers("accept", ACCEPT_HTML.split(',').collect::<Vec<&str>>()))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<title>Hi</title>", "text/html"))
            .expect(1)
            .mount(&server)
            .await;

        let doc = fetcher()
            .get(&format!("{}/", server.uri()), profile(2_000, 3))
            .await
            .unwrap();

        assert_eq!(doc.status_code, 200);
        assert_eq!(doc.body, "<title>Hi</title>");
        assert!(doc.content_type().unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = fetcher()
            .get(&format!("{}/broken", server.uri()), profile(2_000, 3))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Status(500));
    }

    #[tokio::test]
    async fn test_redirect_cap() {
        let server = MockServer::start().await;
        for (from, to) in [("/a", "/b"), ("/b", "/c"), ("/c", "/d")] {
            Mock::given(method("GET"))
                .and(path(from))
                .respond_with(ResponseTemplate::new(302).insert_header("location", to))
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/d"))
            .respond_with(ResponseTemplate::new(200).set_body_string("end"))
            .mount(&server)
            .await;

        let fetcher = fetcher();
        let url = format!("{}/a", server.uri());

        let err = fetcher.get(&url, profile(2_000, 1)).await.unwrap_err();
        assert_eq!(err, FetchError::RedirectLimit(1));

        let doc = fetcher.get(&url, profile(2_000, 5)).await.unwrap();
        assert_eq!(doc.final_url, format!("{}/d", server.uri()));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let err = fetcher()
            .get(&server.uri(), profile(50, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }
}
