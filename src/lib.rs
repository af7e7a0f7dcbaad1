pub mod config;
pub mod error;
pub mod proxy;
pub mod server;
pub mod tools;

pub use config::Config;
pub use error::{ProxyError, Result};
pub use proxy::ProxyClient;
pub use server::McpServer;
