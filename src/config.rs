use crate::error::{ProxyError, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_REST_BASE: &str = "http://127.0.0.1:7171";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the upstream arXiv proxy REST service.
    pub rest_base: String,
    /// Address the MCP server listens on.
    pub listen_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let rest_base =
            env::var("REST_BASE").unwrap_or_else(|_| DEFAULT_REST_BASE.to_string());
        if rest_base.trim().is_empty() {
            return Err(ProxyError::ConfigError(
                "REST_BASE must not be empty".to_string(),
            ));
        }

        let listen_addr =
            env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());

        Ok(Config {
            rest_base: rest_base.trim_end_matches('/').to_string(),
            listen_addr,
        })
    }

    pub fn from_url(rest_base: String) -> Self {
        Config {
            rest_base: rest_base.trim_end_matches('/').to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}
