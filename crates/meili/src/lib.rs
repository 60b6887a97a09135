//! REST client for the remote Meilisearch engine.
//!
//! Wraps the engine's HTTP API (health, index stats, search, per-category
//! settings reads and updates, settings reset) and owns the translation from
//! a validated [`meilgate_core::search::SearchQuery`] into the engine's
//! native search request.

pub mod api;
pub mod settings;
pub mod types;
