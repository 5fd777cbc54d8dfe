//! Sample data builders shared by the integration tests

use bson::oid::ObjectId;
use chrono::{Duration, Utc};

use linkstash_api::models::{Comment, Link, Tag, User};

pub fn alice() -> User {
    User::new("alice@example.com", "Alice")
}

pub fn bob() -> User {
    User::new("bob@example.com", "Bob")
}

pub fn link(url: &str, owner: &User) -> Link {
    Link::new(url, owner.id)
}

/// A link created `age_days` days in the past, for ordering tests
pub fn aged_link(url: &str, owner: &User, age_days: i64) -> Link {
    let mut link = Link::new(url, owner.id);
    link.created_at = Utc::now() - Duration::days(age_days);
    link
}

pub fn link_with_votes(url: &str, owner: &User, voters: &[ObjectId]) -> Link {
    let mut link = Link::new(url, owner.id);
    link.votes = voters.to_vec();
    link
}

pub fn link_with_comment(url: &str, owner: &User, author: &User, text: &str) -> (Link, Comment) {
    let mut link = Link::new(url, owner.id);
    let comment = Comment::new(author.id, text);
    link.comments.push(comment.clone());
    (link, comment)
}

pub fn tag(name: &str) -> Tag {
    Tag::new(name)
}
