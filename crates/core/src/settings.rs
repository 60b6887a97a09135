//! Index settings DTOs and the searchable-attribute weight annotation.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Update payload
// ---------------------------------------------------------------------------

/// Body accepted by the settings update endpoints.
///
/// Each endpoint reads the one list it manages and rejects the request if
/// that list is absent. `weights` only annotates searchable attributes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdateRequest {
    pub searchable_attributes: Option<Vec<String>>,
    pub filterable_attributes: Option<Vec<String>>,
    pub sortable_attributes: Option<Vec<String>>,
    pub ranking_rules: Option<Vec<String>>,
    /// `null` and absent both mean no weights.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub weights: BTreeMap<String, i64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, i64>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SettingsUpdateRequest {
    /// Searchable attributes with weights applied.
    pub fn weighted_searchable_attributes(&self) -> Result<Vec<String>, CoreError> {
        let attrs = require(&self.searchable_attributes, "searchable_attributes")?;
        Ok(apply_weights(attrs, &self.weights))
    }

    pub fn filterable_attributes(&self) -> Result<&[String], CoreError> {
        require(&self.filterable_attributes, "filterable_attributes")
    }

    pub fn sortable_attributes(&self) -> Result<&[String], CoreError> {
        require(&self.sortable_attributes, "sortable_attributes")
    }

    pub fn ranking_rules(&self) -> Result<&[String], CoreError> {
        require(&self.ranking_rules, "ranking_rules")
    }
}

fn require<'a>(list: &'a Option<Vec<String>>, field: &str) -> Result<&'a [String], CoreError> {
    list.as_deref()
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// Append `:<weight>` to every attribute that has an entry in `weights`.
///
/// Attributes without a weight pass through unchanged, and order is kept.
pub fn apply_weights(attributes: &[String], weights: &BTreeMap<String, i64>) -> Vec<String> {
    attributes
        .iter()
        .map(|attr| match weights.get(attr) {
            Some(weight) => format!("{attr}:{weight}"),
            None => attr.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Response for accepted settings mutations. The change is enqueued on the
/// engine, not applied, when this is returned.
#[derive(Debug, Clone, Serialize)]
pub struct SettingResponse {
    pub success: bool,
    pub message: String,
    pub task_uid: u64,
}

impl SettingResponse {
    pub fn accepted(message: impl Into<String>, task_uid: u64) -> Self {
        Self {
            success: true,
            message: message.into(),
            task_uid,
        }
    }
}

/// Read-only projection of the index settings.
///
/// Categories the engine failed to return are left at their empty default.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsSnapshot {
    pub searchable_attributes: Vec<String>,
    pub filterable_attributes: Vec<String>,
    pub sortable_attributes: Vec<String>,
    pub ranking_rules: Vec<String>,
    pub displayed_attributes: Vec<String>,
    pub stop_words: Vec<String>,
    pub synonyms: BTreeMap<String, Vec<String>>,
    pub typo_tolerance: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn weights_annotate_only_weighted_attributes() {
        let weights = BTreeMap::from([("title".to_string(), 10)]);
        assert_eq!(
            apply_weights(&strings(&["title", "body"]), &weights),
            vec!["title:10", "body"]
        );
    }

    #[test]
    fn weights_for_unknown_attributes_are_ignored() {
        let weights = BTreeMap::from([("missing".to_string(), 3)]);
        assert_eq!(
            apply_weights(&strings(&["title"]), &weights),
            vec!["title"]
        );
    }

    #[test]
    fn update_request_parses_documented_body() {
        let req: SettingsUpdateRequest = serde_json::from_value(json!({
            "searchable_attributes": ["title", "body"],
            "weights": {"title": 10}
        }))
        .unwrap();
        assert_eq!(
            req.weighted_searchable_attributes().unwrap(),
            vec!["title:10", "body"]
        );
    }

    #[test]
    fn null_weights_mean_no_weights() {
        let req: SettingsUpdateRequest = serde_json::from_value(json!({
            "searchable_attributes": ["title", "body"],
            "weights": null
        }))
        .unwrap();
        assert!(req.weights.is_empty());
        assert_eq!(
            req.weighted_searchable_attributes().unwrap(),
            vec!["title", "body"]
        );
    }

    #[test]
    fn missing_list_is_a_validation_error() {
        let req = SettingsUpdateRequest::default();
        assert_matches!(
            req.ranking_rules(),
            Err(CoreError::Validation(msg)) if msg == "ranking_rules is required"
        );
    }

    #[test]
    fn empty_snapshot_serializes_empty_containers() {
        let json = serde_json::to_value(SettingsSnapshot::default()).unwrap();
        assert_eq!(json["synonyms"], json!({}));
        assert_eq!(json["typo_tolerance"], json!({}));
        assert_eq!(json["stop_words"], json!([]));
    }

    #[test]
    fn accepted_response_carries_task_uid() {
        let json = serde_json::to_value(SettingResponse::accepted("settings reset", 42)).unwrap();
        assert_eq!(json, json!({"success": true, "message": "settings reset", "task_uid": 42}));
    }
}
