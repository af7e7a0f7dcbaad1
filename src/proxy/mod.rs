pub mod client;

pub use client::{ProxyClient, HEALTH_TIMEOUT};
