//! Document store repository layer
//!
//! This module centralizes all MongoDB access behind repository traits so
//! resolvers, loaders, and services never touch collections directly. The
//! traits are the test seam: integration tests run the schema against fake
//! implementations, no running database required.

pub mod link;
pub mod tag;
pub mod user;

pub use link::{LinkRepository, MongoLinkRepository};
pub use tag::{MongoTagRepository, TagRepository};
pub use user::{MongoUserRepository, UserRepository};

/// Escape regex metacharacters in a user-supplied search prefix
pub(crate) fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(
            ch,
            '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
