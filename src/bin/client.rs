use serde_json::{json, Value};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

type Reader = BufReader<OwnedReadHalf>;
type Writer = OwnedWriteHalf;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    println!("╔═══════════════════════════════════════════════════════╗");
    println!("║   arXiv Proxy MCP Server - Test Client v1.0          ║");
    println!("╚═══════════════════════════════════════════════════════╝\n");

    // Connect to server
    let addr = "127.0.0.1:8080";
    println!("Connecting to server at {}...", addr);

    let socket = TcpStream::connect(addr).await?;
    let (reader, writer) = socket.into_split();
    let reader = BufReader::new(reader);

    println!("✓ Connected successfully!\n");

    let mut client = TestClient::new(reader, writer);

    loop {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║ Available Commands:                                  ║");
        println!("║ 1. search_papers      - Search arXiv by query       ║");
        println!("║ 2. get_paper          - Fetch paper metadata        ║");
        println!("║ 3. download_pdf       - Download paper PDF (base64) ║");
        println!("║ 4. get_paper_html     - Fetch HTML rendering        ║");
        println!("║ 5. get_paper_markdown - Fetch markdown rendering    ║");
        println!("║ 6. tools/list         - List available tools        ║");
        println!("║ 7. exit               - Close connection            ║");
        println!("╚═══════════════════════════════════════════════════════╝");
        print!("\nEnter command number (1-7): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let choice = input.trim();

        match choice {
            "1" => {
                client.search_papers().await?;
            }
            "2" => {
                client.paper_tool("get_paper", "Get Paper Metadata").await?;
            }
            "3" => {
                client.paper_tool("download_pdf", "Download Paper PDF").await?;
            }
            "4" => {
                client
                    .paper_tool("get_paper_html", "Get Paper HTML")
                    .await?;
            }
            "5" => {
                client
                    .paper_tool("get_paper_markdown", "Get Paper Markdown")
                    .await?;
            }
            "6" => {
                client.list_tools().await?;
            }
            "7" => {
                println!("\nGoodbye!");
                break;
            }
            _ => println!("Invalid choice. Please enter 1-7."),
        }
    }

    Ok(())
}

struct TestClient {
    reader: Reader,
    writer: Writer,
    request_id: i32,
}

impl TestClient {
    fn new(reader: Reader, writer: Writer) -> Self {
        TestClient {
            reader,
            writer,
            request_id: 1,
        }
    }

    async fn send_request(&mut self, request: Value) -> eyre::Result<()> {
        let request_json = serde_json::to_string(&request)?;
        println!(
            "\n→ Sending request:\n{}",
            serde_json::to_string_pretty(&request)?
        );

        self.writer.write_all(request_json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;

        // Read response
        let mut response_line = String::new();
        self.reader.read_line(&mut response_line).await?;

        if !response_line.is_empty() {
            println!("\n← Response received:");
            let response: Value = serde_json::from_str(&response_line)?;
            println!("{}", serde_json::to_string_pretty(&response)?);

            if let Some(error) = response.get("error") {
                if !error.is_null() {
                    println!(
                        "\n⚠️  Error: {}",
                        error.get("message").unwrap_or(&Value::Null)
                    );
                }
            }
        }

        self.request_id += 1;
        Ok(())
    }

    async fn search_papers(&mut self) -> eyre::Result<()> {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║ Search Papers Tool                                   ║");
        println!("╚═══════════════════════════════════════════════════════╝");

        print!("\nEnter search query (arXiv query syntax): ");
        io::stdout().flush()?;
        let mut query = String::new();
        io::stdin().read_line(&mut query)?;
        let query = query.trim().to_string();

        print!("Enter max results (1-50, default 10): ");
        io::stdout().flush()?;
        let mut max_results = String::new();
        io::stdin().read_line(&mut max_results)?;
        let max_results: u32 = max_results.trim().parse().unwrap_or(10);

        print!("Enter sort criterion (relevance/lastUpdatedDate/submittedDate, default relevance): ");
        io::stdout().flush()?;
        let mut sort_by = String::new();
        io::stdin().read_line(&mut sort_by)?;
        let sort_by = match sort_by.trim() {
            "" => "relevance".to_string(),
            other => other.to_string(),
        };

        print!("Enter sort order (ascending/descending, default descending): ");
        io::stdout().flush()?;
        let mut sort_order = String::new();
        io::stdin().read_line(&mut sort_order)?;
        let sort_order = match sort_order.trim() {
            "" => "descending".to_string(),
            other => other.to_string(),
        };

        let request = json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": {
                "name": "search_papers",
                "arguments": {
                    "query": query,
                    "max_results": max_results,
                    "sort_by": sort_by,
                    "sort_order": sort_order
                }
            },
            "id": self.request_id
        });

        self.send_request(request).await?;
        Ok(())
    }

    async fn paper_tool(&mut self, tool_name: &str, title: &str) -> eyre::Result<()> {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║ {:<53} ║", title);
        println!("╚═══════════════════════════════════════════════════════╝");

        print!("\nEnter arXiv paper ID (e.g. 2301.00001v1): ");
        io::stdout().flush()?;
        let mut arxiv_id = String::new();
        io::stdin().read_line(&mut arxiv_id)?;
        let arxiv_id = arxiv_id.trim().to_string();

        let request = json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": {
                "name": tool_name,
                "arguments": {
                    "arxiv_id": arxiv_id
                }
            },
            "id": self.request_id
        });

        self.send_request(request).await?;
        Ok(())
    }

    async fn list_tools(&mut self) -> eyre::Result<()> {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║ Listing Available Tools                              ║");
        println!("╚═══════════════════════════════════════════════════════╝");

        let request = json!({
            "jsonrpc": "2.0",
            "method": "tools/list",
            "params": {},
            "id": self.request_id
        });

        self.send_request(request).await?;
        Ok(())
    }
}
