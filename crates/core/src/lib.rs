//! Domain logic for the search gateway.
//!
//! Everything here is pure and I/O free: filter-expression building,
//! request normalization, response shaping and the settings DTOs. The
//! remote engine client and the HTTP layer both build on these types.

pub mod error;
pub mod filter;
pub mod optimization;
pub mod search;
pub mod settings;
