//! Search request normalization and response shaping.
//!
//! [`SearchQuery::normalize`] turns raw client input into a validated query
//! with a server-computed offset; [`SearchEnvelope::shape`] turns the
//! engine's result into the stable paginated response contract.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::filter::{build_filter_expressions, parse_filters, FilterMap};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page used when the client supplies none (pages are 1-based).
pub const DEFAULT_PAGE: u64 = 1;

/// Number of hits per page when the client supplies no `limit`.
pub const DEFAULT_LIMIT: u64 = 20;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Raw search parameters as they arrive from the client, before validation.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    pub query: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// JSON-encoded object of field -> value.
    pub filters: Option<String>,
    pub sort: Vec<String>,
}

/// A validated search request.
///
/// `offset` is always `(page - 1) * limit`; a client-supplied offset is
/// never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub page: u64,
    pub limit: u64,
    pub offset: u64,
    pub filters: FilterMap,
    pub sort: Vec<String>,
    /// Filter fields dropped because their value had no filter form.
    pub skipped_filters: Vec<String>,
}

impl SearchQuery {
    /// Validate client input.
    ///
    /// - `query` is required and must be non-empty.
    /// - `page` defaults to 1; anything below 1 is raised to 1.
    /// - `limit` defaults to 20 and must be at least 1. When `max_limit` is
    ///   set, larger values are rejected rather than capped.
    pub fn normalize(input: SearchInput, max_limit: Option<u64>) -> Result<Self, CoreError> {
        let query = input
            .query
            .filter(|q| !q.is_empty())
            .ok_or_else(|| CoreError::Validation("query is required".to_string()))?;

        let page = match input.page {
            Some(p) if p >= 1 => p as u64,
            _ => DEFAULT_PAGE,
        };

        let limit = match input.limit {
            None => DEFAULT_LIMIT,
            Some(l) if l < 1 => {
                return Err(CoreError::Validation(format!(
                    "limit must be at least 1, got {l}"
                )))
            }
            Some(l) => l as u64,
        };
        if let Some(max) = max_limit {
            if limit > max {
                return Err(CoreError::Validation(format!(
                    "limit must not exceed {max}, got {limit}"
                )));
            }
        }

        let offset = compute_offset(page, limit)?;

        let (filters, skipped_filters) = match input.filters.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                let parsed = parse_filters(raw)?;
                (parsed.filters, parsed.skipped)
            }
            _ => (FilterMap::new(), Vec::new()),
        };

        Ok(Self {
            query,
            page,
            limit,
            offset,
            filters,
            sort: input.sort,
            skipped_filters,
        })
    }

    /// Filter expressions in the engine's syntax, one per filter field.
    pub fn filter_expressions(&self) -> Vec<String> {
        build_filter_expressions(&self.filters)
    }
}

/// `(page - 1) * limit`, rejecting combinations that overflow.
pub fn compute_offset(page: u64, limit: u64) -> Result<u64, CoreError> {
    page.saturating_sub(1)
        .checked_mul(limit)
        .ok_or_else(|| CoreError::Validation("page and limit are too large".to_string()))
}

/// Collect sort parameters, one expression per occurrence.
///
/// Values are never split: expressions such as `_geoPoint(48.8,2.3):asc`
/// contain commas. Order is preserved and blank values are dropped.
pub fn parse_sort<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|value| value.as_ref().trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// `ceil(estimated_total_hits / limit)`, or `None` when there are no hits.
pub fn total_pages(estimated_total_hits: u64, limit: u64) -> Option<u64> {
    if estimated_total_hits == 0 || limit == 0 {
        return None;
    }
    Some(estimated_total_hits.div_ceil(limit))
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Paginated search response returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEnvelope {
    pub hits: Vec<Map<String, Value>>,
    pub estimated_total_hits: u64,
    pub query: String,
    pub limit: u64,
    pub offset: u64,
    pub page: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    pub processing_time_ms: u64,
    #[serde(rename = "indexUID")]
    pub index_uid: String,
}

impl SearchEnvelope {
    /// Build the envelope from the engine's raw result.
    ///
    /// Hits that are not JSON objects are dropped instead of failing the
    /// request; the second element of the tuple is how many were dropped.
    pub fn shape(
        query: &SearchQuery,
        hits: Vec<Value>,
        estimated_total_hits: u64,
        processing_time_ms: u64,
        index_uid: &str,
    ) -> (Self, usize) {
        let received = hits.len();
        let hits: Vec<Map<String, Value>> = hits
            .into_iter()
            .filter_map(|hit| match hit {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        let dropped = received - hits.len();

        let envelope = Self {
            hits,
            estimated_total_hits,
            query: query.query.clone(),
            limit: query.limit,
            offset: query.offset,
            page: query.page,
            total_pages: total_pages(estimated_total_hits, query.limit),
            processing_time_ms,
            index_uid: index_uid.to_string(),
        };
        (envelope, dropped)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
