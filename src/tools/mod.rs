pub mod paper;
pub mod pdf;
pub mod search;

pub use paper::PaperTool;
pub use pdf::PdfTool;
pub use search::SearchTool;

use serde::{Deserialize, Serialize};

use crate::error::ProxyError;

pub const OFFLINE_MESSAGE: &str = "arXiv proxy service is currently offline.";

/// One text block inside an MCP tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// MCP tool-call result envelope: text content plus an explicit error flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(text: String) -> Self {
        ToolResult {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error: false,
        }
    }

    /// Success result carrying the upstream payload pretty-printed.
    pub fn json(value: &serde_json::Value) -> Self {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        ToolResult::text(text)
    }

    pub fn error(message: String) -> Self {
        ToolResult {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: message,
            }],
            is_error: true,
        }
    }

    pub fn offline() -> Self {
        ToolResult::error(OFFLINE_MESSAGE.to_string())
    }
}

impl From<ProxyError> for ToolResult {
    fn from(err: ProxyError) -> Self {
        ToolResult::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_result_serialization() {
        let result = ToolResult::text("hello".to_string());
        let serialized = serde_json::to_value(&result).unwrap();
        assert_eq!(serialized["content"][0]["type"], "text");
        assert_eq!(serialized["content"][0]["text"], "hello");
        assert_eq!(serialized["isError"], false);
    }

    #[test]
    fn test_json_result_is_pretty_printed() {
        let payload = json!({"results": []});
        let result = ToolResult::json(&payload);
        let text = &result.content[0].text;
        assert_eq!(text, &serde_json::to_string_pretty(&payload).unwrap());

        // Round-trips back to an equal structure.
        let reparsed: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(reparsed, payload);
    }

    #[test]
    fn test_offline_result() {
        let result = ToolResult::offline();
        assert!(result.is_error);
        assert_eq!(result.content[0].text, OFFLINE_MESSAGE);
    }

    #[test]
    fn test_from_proxy_error() {
        let result = ToolResult::from(ProxyError::UpstreamStatus(404));
        assert!(result.is_error);
        assert_eq!(result.content[0].text, "PDF download failed: 404");
    }
}
