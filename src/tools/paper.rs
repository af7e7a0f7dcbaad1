use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ToolResult;
use crate::proxy::ProxyClient;

/// Arguments shared by all per-paper tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRequest {
    pub arxiv_id: String,
}

/// Per-paper JSON tools: metadata, HTML rendering, markdown rendering.
/// All three follow the same gate-then-fetch sequence and differ only in
/// the upstream route.
pub struct PaperTool {
    client: ProxyClient,
}

impl PaperTool {
    pub fn new(client: ProxyClient) -> Self {
        PaperTool { client }
    }

    pub async fn get_metadata(&self, request: PaperRequest) -> ToolResult {
        debug!("get_paper: arxiv_id={}", request.arxiv_id);

        if !self.client.check_health().await {
            return ToolResult::offline();
        }

        match self.client.paper_metadata(&request.arxiv_id).await {
            Ok(data) => ToolResult::json(&data),
            Err(e) => ToolResult::from(e),
        }
    }

    pub async fn get_html(&self, request: PaperRequest) -> ToolResult {
        debug!("get_paper_html: arxiv_id={}", request.arxiv_id);

        if !self.client.check_health().await {
            return ToolResult::offline();
        }

        match self.client.paper_html(&request.arxiv_id).await {
            Ok(data) => ToolResult::json(&data),
            Err(e) => ToolResult::from(e),
        }
    }

    pub async fn get_markdown(&self, request: PaperRequest) -> ToolResult {
        debug!("get_paper_markdown: arxiv_id={}", request.arxiv_id);

        if !self.client.check_health().await {
            return ToolResult::offline();
        }

        match self.client.paper_markdown(&request.arxiv_id).await {
            Ok(data) => ToolResult::json(&data),
            Err(e) => ToolResult::from(e),
        }
    }
}
