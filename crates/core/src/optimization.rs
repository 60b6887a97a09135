//! Search optimization defaults applied uniformly to every search call.
//!
//! Loaded once from the `[search.optimization]` config section and never
//! mutated afterwards.

use serde::Deserialize;

/// Attribute list value meaning "retrieve everything".
pub const RETRIEVE_ALL: &str = "*";

/// Crop/highlight/retrieve/search-on defaults.
///
/// Every field is optional in the config file; an empty list means the
/// corresponding engine parameter is not sent at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptimizationConfig {
    pub attributes_to_crop: Vec<String>,
    pub crop_length: Option<u32>,
    pub attributes_to_highlight: Vec<String>,
    pub highlight_pre_tag: Option<String>,
    pub highlight_post_tag: Option<String>,
    pub attributes_to_retrieve: Vec<String>,
    pub attributes_to_search_on: Vec<String>,
}

impl OptimizationConfig {
    /// The retrieval restriction to send, if any.
    ///
    /// `["*"]` is the same as no restriction, so it is omitted instead of
    /// being sent literally.
    pub fn retrieve_restriction(&self) -> Option<&[String]> {
        match self.attributes_to_retrieve.as_slice() {
            [] => None,
            [only] if only == RETRIEVE_ALL => None,
            attrs => Some(attrs),
        }
    }

    /// Crop attributes and length, only when the crop list is non-empty.
    pub fn crop(&self) -> Option<(&[String], Option<u32>)> {
        if self.attributes_to_crop.is_empty() {
            return None;
        }
        Some((&self.attributes_to_crop, self.crop_length))
    }

    /// Highlight attributes, only when the highlight list is non-empty.
    pub fn highlight(&self) -> Option<&[String]> {
        if self.attributes_to_highlight.is_empty() {
            None
        } else {
            Some(&self.attributes_to_highlight)
        }
    }

    /// Pre/post highlight tags. Blank tags are treated as unset.
    pub fn highlight_tags(&self) -> (Option<&str>, Option<&str>) {
        fn non_blank(tag: &Option<String>) -> Option<&str> {
            tag.as_deref().filter(|t| !t.is_empty())
        }
        (
            non_blank(&self.highlight_pre_tag),
            non_blank(&self.highlight_post_tag),
        )
    }

    pub fn search_on(&self) -> Option<&[String]> {
        if self.attributes_to_search_on.is_empty() {
            None
        } else {
            Some(&self.attributes_to_search_on)
        }
    }
}
