//! Shared pagination utilities for GraphQL resolvers

/// Default number of links returned by a search when no count is requested
pub const DEFAULT_LINK_COUNT: i32 = 20;

/// Hard cap on returned links, regardless of the requested count
pub const MAX_LINK_RESULTS: i32 = 50;

/// Maximum results for tag prefix search
pub const MAX_TAG_RESULTS: i64 = 10;

/// Clamp a requested count to the valid range, applying the default.
///
/// A count of 0 means "not specified" and gets the default, same as omitting
/// it.
#[inline]
pub fn clamp_count(count: Option<i32>) -> i64 {
    match count {
        None | Some(0) => DEFAULT_LINK_COUNT as i64,
        Some(n) => n.clamp(1, MAX_LINK_RESULTS) as i64,
    }
}

/// Clamp a requested skip offset to non-negative
#[inline]
pub fn clamp_skip(first: Option<i32>) -> u64 {
    first.unwrap_or(0).max(0) as u64
}
