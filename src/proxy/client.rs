use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ProxyError, Result};
use crate::tools::search::SearchRequest;

/// Bound on the liveness probe; a slow health endpoint counts as down.
pub const HEALTH_TIMEOUT: Duration = Duration::from_millis(3000);

/// HTTP client for the upstream arXiv proxy REST service.
///
/// Each method issues exactly one request; there is no retry, caching, or
/// connection management beyond reqwest's defaults.
#[derive(Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: String) -> Self {
        ProxyClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn route(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probe `GET /v1/health` and reduce the outcome to a boolean.
    ///
    /// Up means the body parses as JSON and `data.status` is exactly
    /// "healthy". Timeouts, transport failures, and malformed bodies all
    /// count as down; this never returns an error.
    pub async fn check_health(&self) -> bool {
        let response = match self
            .http
            .get(self.route("/v1/health"))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("health probe failed: {}", e);
                return false;
            }
        };

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                debug!("health body unreadable: {}", e);
                return false;
            }
        };

        body.pointer("/data/status").and_then(Value::as_str) == Some("healthy")
    }

    /// POST `/v1/search` with the arXiv query parameters. The start offset
    /// is always 0; paging is not exposed through the tool surface.
    pub async fn search(&self, request: &SearchRequest) -> Result<Value> {
        let body = serde_json::json!({
            "query": request.query,
            "start": 0,
            "max_results": request.max_results,
            "sort_by": request.sort_by,
            "sort_order": request.sort_order,
        });

        let response = self
            .http
            .post(self.route("/v1/search"))
            .json(&body)
            .send()
            .await?;

        Ok(response.json().await?)
    }

    pub async fn paper_metadata(&self, arxiv_id: &str) -> Result<Value> {
        self.get_json(&format!("/v1/paper/{}", arxiv_id)).await
    }

    pub async fn paper_html(&self, arxiv_id: &str) -> Result<Value> {
        self.get_json(&format!("/v1/paper/{}/html", arxiv_id)).await
    }

    pub async fn paper_markdown(&self, arxiv_id: &str) -> Result<Value> {
        self.get_json(&format!("/v1/paper/{}/markdown", arxiv_id))
            .await
    }

    /// GET the PDF body for a paper. A non-success status is surfaced as
    /// `UpstreamStatus` without reading the body.
    pub async fn paper_pdf(&self, arxiv_id: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(self.route(&format!("/v1/paper/{}/pdf", arxiv_id)))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("PDF fetch for {} returned {}", arxiv_id, status);
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self.http.get(self.route(path)).send().await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::search::{SortBy, SortOrder};
    use serde_json::json;

    #[tokio::test]
    async fn test_check_health_healthy() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/health")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": {"status": "healthy"}}).to_string())
            .create_async()
            .await;

        let client = ProxyClient::new(server.url());
        assert!(client.check_health().await);
    }

    #[tokio::test]
    async fn test_check_health_degraded_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/health")
            .with_status(503)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": {"status": "shutting_down"}}).to_string())
            .create_async()
            .await;

        let client = ProxyClient::new(server.url());
        assert!(!client.check_health().await);
    }

    #[tokio::test]
    async fn test_check_health_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/health")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = ProxyClient::new(server.url());
        assert!(!client.check_health().await);
    }

    #[tokio::test]
    async fn test_check_health_missing_status_field() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/health")
            .with_status(200)
            .with_body(json!({"data": {}}).to_string())
            .create_async()
            .await;

        let client = ProxyClient::new(server.url());
        assert!(!client.check_health().await);
    }

    #[tokio::test]
    async fn test_check_health_connection_refused() {
        // Port 1 is never listening; the probe must reduce to false.
        let client = ProxyClient::new("http://127.0.0.1:1".to_string());
        assert!(!client.check_health().await);
    }

    #[tokio::test]
    async fn test_check_health_hung_endpoint_times_out() {
        // A listener that accepts connections but never writes a response;
        // the probe must abort at the timeout and reduce to false.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = ProxyClient::new(format!("http://{}", addr));
        let started = std::time::Instant::now();
        assert!(!client.check_health().await);
        assert!(started.elapsed() >= HEALTH_TIMEOUT);
        assert!(started.elapsed() < HEALTH_TIMEOUT + Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_search_posts_expected_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/search")
            .match_body(mockito::Matcher::Json(json!({
                "query": "quantum",
                "start": 0,
                "max_results": 5,
                "sort_by": "relevance",
                "sort_order": "descending",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"results": []}).to_string())
            .create_async()
            .await;

        let client = ProxyClient::new(server.url());
        let request = SearchRequest {
            query: "quantum".to_string(),
            max_results: 5,
            sort_by: SortBy::Relevance,
            sort_order: SortOrder::Descending,
        };

        let results = client.search(&request).await.unwrap();
        assert_eq!(results, json!({"results": []}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_paper_metadata_route() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/paper/2301.00001v1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": {"title": "A Paper"}}).to_string())
            .create_async()
            .await;

        let client = ProxyClient::new(server.url());
        let data = client.paper_metadata("2301.00001v1").await.unwrap();
        assert_eq!(data["data"]["title"], "A Paper");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_paper_pdf_success_returns_bytes() {
        let pdf_bytes = b"%PDF-1.4 fake body".to_vec();
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/paper/2301.00001v1/pdf")
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .with_body(pdf_bytes.clone())
            .create_async()
            .await;

        let client = ProxyClient::new(server.url());
        let bytes = client.paper_pdf("2301.00001v1").await.unwrap();
        assert_eq!(bytes, pdf_bytes);
    }

    #[tokio::test]
    async fn test_paper_pdf_not_found_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/paper/nope/pdf")
            .with_status(404)
            .create_async()
            .await;

        let client = ProxyClient::new(server.url());
        match client.paper_pdf("nope").await {
            Err(ProxyError::UpstreamStatus(404)) => {}
            other => panic!("expected UpstreamStatus(404), got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_paper_pdf_server_error_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/paper/broken/pdf")
            .with_status(500)
            .create_async()
            .await;

        let client = ProxyClient::new(server.url());
        match client.paper_pdf("broken").await {
            Err(ProxyError::UpstreamStatus(500)) => {}
            other => panic!("expected UpstreamStatus(500), got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_get_json_transport_failure() {
        let client = ProxyClient::new("http://127.0.0.1:1".to_string());
        match client.paper_metadata("2301.00001v1").await {
            Err(ProxyError::Transport(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected Transport error, got {:?}", other.err()),
        }
    }
}
