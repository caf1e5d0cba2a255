// src/checker/http.rs
// =============================================================================
// This module talks HTTP: page fetches (GET) and link status checks (HEAD).
//
// Key functionality:
// - One shared reqwest Client per crawl (connection pooling)
// - Browser-like User-Agent on every request
// - HEAD first for status checks, falling back to GET when HEAD says >= 400
// - Transport failures (DNS, refused connection, timeout) become status 0
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Result<T, E>: The raw get/head calls return reqwest errors, the status
//   checker swallows them
// =============================================================================

use crate::config::CrawlConfig;
use crate::error::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, trace};

/// Status reported when no HTTP response was received at all
pub const CONNECTION_ERROR: u16 = 0;

/// A link is broken when it was unreachable or answered with 4xx/5xx
pub fn is_broken(status_code: u16) -> bool {
    status_code == CONNECTION_ERROR || status_code >= 400
}

// Thin wrapper around reqwest that knows our timeouts.
//
// Cloning is cheap: reqwest::Client is reference counted internally.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    page_timeout: Duration,
    check_timeout: Duration,
}

impl HttpClient {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(5)) // Follow up to 5 redirects
            .build()?;

        Ok(Self {
            client,
            page_timeout: config.page_timeout,
            check_timeout: config.check_timeout(),
        })
    }

    pub fn page_timeout(&self) -> Duration {
        self.page_timeout
    }

    /// GET a URL and read the whole body
    pub async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<(u16, String), reqwest::Error> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// HEAD a URL, only the status matters
    pub async fn head(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<u16, reqwest::Error> {
        let response = self.client.head(url).timeout(timeout).send().await?;
        Ok(response.status().as_u16())
    }

    // Checks a single link and returns its status code.
    //
    // HEAD is tried first because it's cheap (no body download). Some servers
    // reject HEAD but happily serve GET, so any status >= 400 gets a second
    // opinion from GET and the GET status wins.
    //
    // Never fails: a request that gets no response at all returns 0.
    pub async fn check_status(&self, url: &str) -> u16 {
        let head_status = match self.head(url, self.check_timeout).await {
            Ok(status) => status,
            Err(e) => {
                debug!("HEAD {} failed: {}", url, e);
                return CONNECTION_ERROR;
            }
        };

        if head_status < 400 {
            trace!("HEAD {} -> {}", url, head_status);
            return head_status;
        }

        debug!("HEAD {} -> {}, retrying with GET", url, head_status);
        match self.client.get(url).timeout(self.page_timeout).send().await {
            Ok(response) => response.status().as_u16(),
            Err(e) => {
                debug!("GET {} failed: {}", url, e);
                CONNECTION_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{header_regex, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client() -> HttpClient {
        HttpClient::new(&CrawlConfig::default()).unwrap()
    }

    #[test]
    fn test_is_broken() {
        assert!(is_broken(0));
        assert!(is_broken(404));
        assert!(is_broken(500));
        assert!(!is_broken(200));
        assert!(!is_broken(301));
        assert!(!is_broken(399));
    }

    #[tokio::test]
    async fn test_head_success_skips_get() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let status = client().check_status(&format!("{}/ok", server.uri())).await;
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn test_head_rejected_falls_back_to_get() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/no-head"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/no-head"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let status = client()
            .check_status(&format!("{}/no-head", server.uri()))
            .await;
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn test_get_status_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let status = client().check_status(&format!("{}/flaky", server.uri())).await;
        assert_eq!(status, 503);
    }

    #[tokio::test]
    async fn test_not_found_stays_broken() {
        let server = MockServer::start().await;

        Mock::given(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let status = client()
            .check_status(&format!("{}/missing", server.uri()))
            .await;
        assert_eq!(status, 404);
        assert!(is_broken(status));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        // Port 1 on localhost is not listening in any sane test environment
        let status = client().check_status("http://127.0.0.1:1/nothing").await;
        assert_eq!(status, CONNECTION_ERROR);
    }

    #[tokio::test]
    async fn test_user_agent_sent() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(header_regex("user-agent", r"^Mozilla/5\.0 "))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let status = client().check_status(&server.uri()).await;
        assert_eq!(status, 204);
    }

    #[tokio::test]
    async fn test_get_returns_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi</p>"))
            .mount(&server)
            .await;

        let client = client();
        let (status, body) = client
            .get(&format!("{}/page", server.uri()), client.page_timeout())
            .await
            .unwrap();
        assert_eq!(status, 200);
        assert_eq!(body, "<p>hi</p>");
    }

    #[tokio::test]
    async fn test_failed_get_fallback_is_connection_error() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        // HEAD answers, then the GET retry times out
        let config = CrawlConfig::default().with_page_timeout(Duration::from_secs(1));
        let client = HttpClient::new(&config).unwrap();
        let status = client.check_status(&format!("{}/slow", server.uri())).await;
        assert_eq!(status, CONNECTION_ERROR);
    }
}
