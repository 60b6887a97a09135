//! Query-string parsing for the search endpoint.
//!
//! The query string is read as ordered key/value pairs so `sort` can repeat.
//! Each `sort` occurrence is one expression.
//! Recognized keys: `query`, `page`, `limit`, `filters`, `sort`. Anything
//! else, including `offset`, is ignored.

use meilgate_core::search::{parse_sort, SearchInput};

use crate::error::{AppError, AppResult};

/// Build raw search input from query-string pairs.
///
/// For single-valued keys the last occurrence wins. `page` and `limit`
/// must be integers when present.
pub fn search_input_from_pairs(pairs: Vec<(String, String)>) -> AppResult<SearchInput> {
    let mut input = SearchInput::default();
    let mut sort = Vec::new();

    for (key, value) in pairs {
        match key.as_str() {
            "query" => input.query = Some(value),
            "page" => input.page = Some(parse_int("page", &value)?),
            "limit" => input.limit = Some(parse_int("limit", &value)?),
            "filters" => input.filters = Some(value),
            "sort" => sort.push(value),
            _ => {}
        }
    }

    input.sort = parse_sort(sort);
    Ok(input)
}

fn parse_int(name: &str, value: &str) -> AppResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{name} must be an integer, got '{value}'")))
}
