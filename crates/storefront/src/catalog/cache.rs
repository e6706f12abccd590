//! Cache types for catalog API responses.

use super::types::Plant;

/// Cache key for catalog listings.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Plants {
        search: Option<String>,
        category: Option<String>,
    },
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Plants(Vec<Plant>),
    Categories(Vec<String>),
}
