use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use super::paper::PaperRequest;
use super::ToolResult;
use crate::proxy::ProxyClient;

/// PDF download tool. Unlike the JSON tools, a successful result is the
/// raw base64 text of the PDF bytes, not a JSON document.
pub struct PdfTool {
    client: ProxyClient,
}

impl PdfTool {
    pub fn new(client: ProxyClient) -> Self {
        PdfTool { client }
    }

    pub async fn download(&self, request: PaperRequest) -> ToolResult {
        debug!("download_pdf: arxiv_id={}", request.arxiv_id);

        if !self.client.check_health().await {
            return ToolResult::offline();
        }

        match self.client.paper_pdf(&request.arxiv_id).await {
            Ok(bytes) => ToolResult::text(STANDARD.encode(bytes)),
            Err(e) => ToolResult::from(e),
        }
    }
}
