use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;
use crate::proxy::ProxyClient;
use crate::tools::paper::{PaperRequest, PaperTool};
use crate::tools::pdf::PdfTool;
use crate::tools::search::{SearchRequest, SearchTool};
use crate::tools::ToolResult;

/// JSON-RPC 2.0 Request format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    pub id: Value,
}

/// JSON-RPC 2.0 Response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// MCP Tool Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// MCP server exposing the arXiv proxy tools.
pub struct McpServer {
    config: Config,
    search_tool: SearchTool,
    paper_tool: PaperTool,
    pdf_tool: PdfTool,
}

impl McpServer {
    pub fn new(config: Config) -> Self {
        let client = ProxyClient::new(config.rest_base.clone());
        McpServer {
            config,
            search_tool: SearchTool::new(client.clone()),
            paper_tool: PaperTool::new(client.clone()),
            pdf_tool: PdfTool::new(client),
        }
    }

    pub fn rest_base(&self) -> &str {
        &self.config.rest_base
    }

    /// Get tool definitions (MCP spec)
    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        let arxiv_id_schema = json!({
            "type": "object",
            "properties": {
                "arxiv_id": {
                    "type": "string",
                    "description": "arXiv paper ID (e.g. '2301.00001v1')"
                }
            },
            "required": ["arxiv_id"]
        });

        vec![
            ToolDefinition {
                name: "search_papers".to_string(),
                description: "Search arXiv for papers matching a query".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search query text (arXiv query syntax)"
                        },
                        "max_results": {
                            "type": "integer",
                            "minimum": 1,
                            "maximum": 50,
                            "description": "Number of results to return (1-50)"
                        },
                        "sort_by": {
                            "type": "string",
                            "enum": ["relevance", "lastUpdatedDate", "submittedDate"],
                            "description": "Sort criterion"
                        },
                        "sort_order": {
                            "type": "string",
                            "enum": ["ascending", "descending"],
                            "description": "Sort direction"
                        }
                    },
                    "required": ["query", "max_results", "sort_by", "sort_order"]
                }),
            },
            ToolDefinition {
                name: "get_paper".to_string(),
                description: "Get full metadata for a specific arXiv paper".to_string(),
                input_schema: arxiv_id_schema.clone(),
            },
            ToolDefinition {
                name: "download_pdf".to_string(),
                description: "Download PDF of an arXiv paper (returns base64-encoded content)"
                    .to_string(),
                input_schema: arxiv_id_schema.clone(),
            },
            ToolDefinition {
                name: "get_paper_html".to_string(),
                description: "Get HTML rendering of an arXiv paper from ar5iv.labs.arxiv.org"
                    .to_string(),
                input_schema: arxiv_id_schema.clone(),
            },
            ToolDefinition {
                name: "get_paper_markdown".to_string(),
                description: "Get markdown rendering of an arXiv paper (converted from HTML)"
                    .to_string(),
                input_schema: arxiv_id_schema,
            },
        ]
    }

    /// Handle a JSON-RPC request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!(
            "Handling MCP request: {} with params: {:?}",
            request.method, request.params
        );

        let response = match request.method.as_str() {
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tool_call(&request.params).await,
            "ping" => Ok(json!({"status": "ok"})),
            _ => Err(JsonRpcError {
                code: -32601,
                message: format!("Method not found: {}", request.method),
                data: None,
            }),
        };

        match response {
            Ok(result) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                result: Some(result),
                error: None,
                id: request.id,
            },
            Err(err) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                result: None,
                error: Some(err),
                id: request.id,
            },
        }
    }

    fn handle_tools_list(&self) -> Result<Value, JsonRpcError> {
        let tools = self.get_tool_definitions();
        serde_json::to_value(&tools).map_err(internal_error)
    }

    async fn handle_tool_call(&self, params: &Value) -> Result<Value, JsonRpcError> {
        let tool_name =
            params
                .get("name")
                .and_then(|v| v.as_str())
                .ok_or_else(|| JsonRpcError {
                    code: -32602,
                    message: "Missing or invalid 'name' parameter".to_string(),
                    data: None,
                })?;

        let arguments = params.get("arguments").ok_or_else(|| JsonRpcError {
            code: -32602,
            message: "Missing 'arguments' parameter".to_string(),
            data: None,
        })?;

        let result = match tool_name {
            "search_papers" => {
                let request: SearchRequest =
                    serde_json::from_value(arguments.clone()).map_err(invalid_arguments)?;
                request.validate().map_err(|msg| JsonRpcError {
                    code: -32602,
                    message: format!("Invalid arguments: {}", msg),
                    data: None,
                })?;
                self.search_tool.search(request).await
            }
            "get_paper" => {
                let request: PaperRequest =
                    serde_json::from_value(arguments.clone()).map_err(invalid_arguments)?;
                self.paper_tool.get_metadata(request).await
            }
            "download_pdf" => {
                let request: PaperRequest =
                    serde_json::from_value(arguments.clone()).map_err(invalid_arguments)?;
                self.pdf_tool.download(request).await
            }
            "get_paper_html" => {
                let request: PaperRequest =
                    serde_json::from_value(arguments.clone()).map_err(invalid_arguments)?;
                self.paper_tool.get_html(request).await
            }
            "get_paper_markdown" => {
                let request: PaperRequest =
                    serde_json::from_value(arguments.clone()).map_err(invalid_arguments)?;
                self.paper_tool.get_markdown(request).await
            }
            _ => {
                return Err(JsonRpcError {
                    code: -32601,
                    message: format!("Tool not found: {}", tool_name),
                    data: None,
                })
            }
        };

        tool_result_value(result)
    }
}

fn invalid_arguments(err: serde_json::Error) -> JsonRpcError {
    JsonRpcError {
        code: -32602,
        message: format!("Invalid arguments: {}", err),
        data: None,
    }
}

fn internal_error(err: serde_json::Error) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Internal error: {}", err),
        data: None,
    }
}

fn tool_result_value(result: ToolResult) -> Result<Value, JsonRpcError> {
    serde_json::to_value(&result).map_err(internal_error)
}
