use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ToolResult;
use crate::proxy::ProxyClient;

pub const MAX_RESULTS_MIN: u32 = 1;
pub const MAX_RESULTS_MAX: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    #[serde(rename = "relevance")]
    Relevance,
    #[serde(rename = "lastUpdatedDate")]
    LastUpdatedDate,
    #[serde(rename = "submittedDate")]
    SubmittedDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u32,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl SearchRequest {
    /// Range check performed by the dispatch layer before any network
    /// activity. Enum fields are already constrained by deserialization.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_results < MAX_RESULTS_MIN || self.max_results > MAX_RESULTS_MAX {
            return Err(format!(
                "max_results must be between {} and {}, got {}",
                MAX_RESULTS_MIN, MAX_RESULTS_MAX, self.max_results
            ));
        }
        Ok(())
    }
}

pub struct SearchTool {
    client: ProxyClient,
}

impl SearchTool {
    pub fn new(client: ProxyClient) -> Self {
        SearchTool { client }
    }

    /// Health-gated search. Offline upstream short-circuits before any
    /// search request is issued.
    pub async fn search(&self, request: SearchRequest) -> ToolResult {
        debug!("search_papers: query={:?}", request.query);

        if !self.client.check_health().await {
            return ToolResult::offline();
        }

        match self.client.search(&request).await {
            Ok(results) => ToolResult::json(&results),
            Err(e) => ToolResult::from(e),
        }
    }
}
