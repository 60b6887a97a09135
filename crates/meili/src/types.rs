//! Wire types for the engine's search and task endpoints.

use meilgate_core::optimization::OptimizationConfig;
use meilgate_core::search::SearchQuery;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /indexes/{uid}/search`.
///
/// Unset fields are omitted so the engine applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub q: String,
    pub offset: u64,
    pub limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_crop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_highlight: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_pre_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_post_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_retrieve: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_search_on: Option<Vec<String>>,
}

impl SearchRequest {
    /// Merge a validated query, its filter expressions and the optimization
    /// defaults into one engine request.
    ///
    /// Optimization settings are applied only when their attribute list is
    /// non-empty; sort and filter only when the client supplied some.
    pub fn assemble(query: &SearchQuery, optimization: &OptimizationConfig) -> Self {
        let mut request = Self {
            q: query.query.clone(),
            offset: query.offset,
            limit: query.limit,
            ..Default::default()
        };

        let filter = query.filter_expressions();
        if !filter.is_empty() {
            request.filter = Some(filter);
        }
        if !query.sort.is_empty() {
            request.sort = Some(query.sort.clone());
        }

        if let Some((attrs, crop_length)) = optimization.crop() {
            request.attributes_to_crop = Some(attrs.to_vec());
            request.crop_length = crop_length;
        }
        if let Some(attrs) = optimization.highlight() {
            let (pre, post) = optimization.highlight_tags();
            request.attributes_to_highlight = Some(attrs.to_vec());
            request.highlight_pre_tag = pre.map(str::to_string);
            request.highlight_post_tag = post.map(str::to_string);
        }
        request.attributes_to_retrieve = optimization.retrieve_restriction().map(<[String]>::to_vec);
        request.attributes_to_search_on = optimization.search_on().map(<[String]>::to_vec);

        request
    }
}

/// The subset of the engine's search response the gateway consumes.
///
/// Hits are kept as raw JSON; shape checks happen when the response
/// envelope is built.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub hits: Vec<Value>,
    #[serde(default)]
    pub estimated_total_hits: u64,
    #[serde(default)]
    pub processing_time_ms: u64,
}

/// Summary returned for every asynchronous mutation (settings update/reset).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub task_uid: u64,
    #[serde(default)]
    pub status: Option<String>,
}
