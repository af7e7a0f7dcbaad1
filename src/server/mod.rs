pub mod mcp;

pub use mcp::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer, ToolDefinition};
