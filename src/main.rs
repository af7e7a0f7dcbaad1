use arxiv_proxy_mcp_server::{Config, McpServer};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting arXiv Proxy MCP Server...");

    let config = Config::from_env()?;

    let addr: SocketAddr = config.listen_addr.parse()?;
    let mcp_server = Arc::new(McpServer::new(config));
    info!("Upstream arXiv proxy service: {}", mcp_server.rest_base());

    let listener = TcpListener::bind(&addr).await?;

    info!("MCP server listening on {}", addr);
    info!(
        "Available tools: search_papers, get_paper, download_pdf, get_paper_html, get_paper_markdown"
    );

    loop {
        let (socket, peer_addr) = listener.accept().await?;
        let mcp_server = Arc::clone(&mcp_server);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, mcp_server).await {
                error!("Error handling connection from {}: {}", peer_addr, e);
            }
        });
    }
}

async fn handle_connection(
    socket: tokio::net::TcpStream,
    mcp_server: Arc<McpServer>,
) -> eyre::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut buf_reader = BufReader::new(reader);
    let mut line = String::new();

    while buf_reader.read_line(&mut line).await? > 0 {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            line.clear();
            continue;
        }

        // Parse JSON-RPC request
        match serde_json::from_str::<arxiv_proxy_mcp_server::server::JsonRpcRequest>(trimmed) {
            Ok(request) => {
                info!(
                    "Received request: {} (id: {:?})",
                    request.method, request.id
                );

                let response = mcp_server.handle_request(request).await;

                let response_json = serde_json::to_string(&response)?;
                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);

                let error_response = json!({
                    "jsonrpc": "2.0",
                    "error": {
                        "code": -32700,
                        "message": "Parse error",
                        "data": e.to_string()
                    },
                    "id": null
                });

                let response_json = serde_json::to_string(&error_response)?;
                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        line.clear();
    }

    Ok(())
}
