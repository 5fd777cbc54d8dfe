//! In-memory fake collaborators for integration tests

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

use async_trait::async_trait;
use bson::oid::ObjectId;

use linkstash_api::error::{ApiError, ApiResult};
use linkstash_api::models::{Comment, Link, LinkOrderField, LinkSearchCriteria, Tag, User};
use linkstash_api::repositories::{LinkRepository, TagRepository, UserRepository};
use linkstash_api::services::{IdentityProvider, PageMetadata, PageMetadataFetcher, Profile};

// ========== Link store ==========

#[derive(Default)]
pub struct FakeLinkRepository {
    links: Mutex<Vec<Link>>,
}

impl FakeLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a link directly, bypassing the repository trait
    pub fn seed(&self, link: Link) {
        self.links.lock().unwrap().push(link);
    }

    /// Snapshot of a stored link by id
    pub fn get(&self, id: ObjectId) -> Option<Link> {
        self.links.lock().unwrap().iter().find(|l| l.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

fn compare_links(a: &Link, b: &Link, order: &[(LinkOrderField, bool)]) -> Ordering {
    for (field, descending) in order {
        let ordering = match field {
            LinkOrderField::CreatedAt => a.created_at.cmp(&b.created_at),
            LinkOrderField::Votes => a.votes.len().cmp(&b.votes.len()),
        };
        let ordering = if *descending { ordering.reverse() } else { ordering };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl LinkRepository for FakeLinkRepository {
    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<Link>> {
        Ok(self.get(id))
    }

    async fn find_by_url(&self, url: &str) -> ApiResult<Option<Link>> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.url == url)
            .cloned())
    }

    async fn search(&self, criteria: &LinkSearchCriteria) -> ApiResult<Vec<Link>> {
        let mut matches: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|link| criteria.owner.map_or(true, |owner| link.owner == owner))
            .filter(|link| {
                criteria.tags.is_empty()
                    || link.tags.iter().any(|tag| criteria.tags.contains(tag))
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| compare_links(a, b, &criteria.order));

        Ok(matches
            .into_iter()
            .skip(criteria.skip as usize)
            .take(criteria.limit as usize)
            .collect())
    }

    async fn insert(&self, link: &Link) -> ApiResult<()> {
        self.seed(link.clone());
        Ok(())
    }

    async fn update_fields(&self, id: ObjectId, url: &str, tags: &[ObjectId]) -> ApiResult<()> {
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.id == id) {
            link.url = url.to_string();
            link.tags = tags.to_vec();
        }
        Ok(())
    }

    async fn push_comment(&self, link_id: ObjectId, comment: &Comment) -> ApiResult<()> {
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.id == link_id) {
            link.comments.push(comment.clone());
        }
        Ok(())
    }

    async fn pull_comment(&self, link_id: ObjectId, comment_id: ObjectId) -> ApiResult<bool> {
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.id == link_id) {
            let before = link.comments.len();
            link.comments.retain(|c| c.id != comment_id);
            return Ok(link.comments.len() < before);
        }
        Ok(false)
    }

    async fn add_vote(&self, link_id: ObjectId, user_id: ObjectId) -> ApiResult<()> {
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.id == link_id) {
            if !link.votes.contains(&user_id) {
                link.votes.push(user_id);
            }
        }
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> ApiResult<bool> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.id != id);
        Ok(links.len() < before)
    }
}

// ========== Tag store ==========

#[derive(Default)]
pub struct FakeTagRepository {
    tags: Mutex<Vec<Tag>>,
    batch_calls: AtomicUsize,
}

impl FakeTagRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, tag: Tag) {
        self.tags.lock().unwrap().push(tag);
    }

    pub fn all(&self) -> Vec<Tag> {
        self.tags.lock().unwrap().clone()
    }

    /// Number of `find_by_ids` batch reads issued so far
    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl TagRepository for FakeTagRepository {
    async fn find_by_ids(&self, ids: &[ObjectId]) -> ApiResult<Vec<Tag>> {
        self.batch_calls.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn find_by_lowercase_name(&self, lowercase_name: &str) -> ApiResult<Option<Tag>> {
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.lowercase_name == lowercase_name)
            .cloned())
    }

    async fn search_prefix(&self, prefix: &str, limit: i64) -> ApiResult<Vec<Tag>> {
        let prefix = prefix.to_lowercase();
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.lowercase_name.starts_with(&prefix))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn insert(&self, tag: &Tag) -> ApiResult<()> {
        self.seed(tag.clone());
        Ok(())
    }
}

// ========== User store ==========

#[derive(Default)]
pub struct FakeUserRepository {
    users: Mutex<Vec<User>>,
    batch_calls: AtomicUsize,
}

impl FakeUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Number of `find_by_ids` batch reads issued so far
    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_id(&self, id: ObjectId) -> ApiResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> ApiResult<Vec<User>> {
        self.batch_calls.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: &User) -> ApiResult<()> {
        self.seed(user.clone());
        Ok(())
    }
}

// ========== Service stubs ==========

/// Identity provider returning a canned result
pub struct StubIdentityProvider {
    result: Result<Profile, ApiError>,
}

impl StubIdentityProvider {
    pub fn returning_profile(name: &str, email: &str) -> Self {
        Self {
            result: Ok(Profile {
                name: name.to_string(),
                email: email.to_string(),
            }),
        }
    }

    pub fn failing_with(error: ApiError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn authenticate(&self, _code: &str, _state: Option<&str>) -> ApiResult<Profile> {
        self.result.clone()
    }
}

/// Page metadata fetcher returning a canned result
pub struct StubPageMetadataFetcher {
    metadata: Option<PageMetadata>,
}

impl StubPageMetadataFetcher {
    /// Fetcher that never finds metadata
    pub fn empty() -> Self {
        Self { metadata: None }
    }

    pub fn returning(metadata: PageMetadata) -> Self {
        Self {
            metadata: Some(metadata),
        }
    }
}

#[async_trait]
impl PageMetadataFetcher for StubPageMetadataFetcher {
    async fn fetch(&self, _url: &str) -> Option<PageMetadata> {
        self.metadata.clone()
    }
}
