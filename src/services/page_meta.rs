//! Best-effort page metadata scraping
//!
//! `createLink` enriches new links with the target page's title, description,
//! and preview image when they can be fetched cheaply. Every failure mode
//! (unreachable host, non-HTML body, oversized page) degrades to `None`;
//! creating a link never fails because of metadata.

use std::time::Duration;

use async_trait::async_trait;

/// Maximum number of bytes of HTML we are willing to scan
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Fetch timeout for the target page
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Metadata scraped from a link's target page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Source of page metadata for newly created links
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageMetadataFetcher: Send + Sync {
    /// Fetch metadata for the given URL; `None` on any failure
    async fn fetch(&self, url: &str) -> Option<PageMetadata>;
}

/// HTTP implementation reading the page's `<title>` and OpenGraph meta tags
pub struct HttpPageMetadataFetcher {
    http: reqwest::Client,
}

impl HttpPageMetadataFetcher {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http }
    }
}

impl Default for HttpPageMetadataFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageMetadataFetcher for HttpPageMetadataFetcher {
    async fn fetch(&self, url: &str) -> Option<PageMetadata> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, "linkstash-api")
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?;

        let mut body = response.text().await.ok()?;
        if body.len() > MAX_BODY_BYTES {
            let mut cut = MAX_BODY_BYTES;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }

        let metadata = extract_metadata(&body);
        if metadata == PageMetadata::default() {
            tracing::debug!(url, "no page metadata found");
        }
        Some(metadata)
    }
}

/// Pull title/description/image out of an HTML document.
///
/// OpenGraph tags win over the plain `<title>`/description fallbacks, which
/// is what the sharing-preview crowd of sites optimizes for anyway.
fn extract_metadata(html: &str) -> PageMetadata {
    PageMetadata {
        title: meta_content(html, "og:title").or_else(|| html_title(html)),
        description: meta_content(html, "og:description")
            .or_else(|| meta_content(html, "description")),
        image_url: meta_content(html, "og:image"),
    }
}

/// Extract the text of the document's `<title>` element
fn html_title(html: &str) -> Option<String> {
    // ASCII-only lowercasing keeps byte offsets valid for slicing `html`;
    // full Unicode lowercasing can change byte lengths.
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let content_start = open + lower[open..].find('>')? + 1;
    let content_end = content_start + lower[content_start..].find("</title")?;

    let title = html[content_start..content_end].trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Find the `content` attribute of the meta tag whose `property` or `name`
/// attribute equals `key`
fn meta_content(html: &str, key: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let mut search_from = 0;

    while let Some(offset) = lower[search_from..].find("<meta") {
        let tag_start = search_from + offset;
        let tag_end = match lower[tag_start..].find('>') {
            Some(end) => tag_start + end,
            None => break,
        };

        let tag = &html[tag_start..tag_end];
        let names_match = attr_value(tag, "property").as_deref() == Some(key)
            || attr_value(tag, "name").as_deref() == Some(key);

        if names_match {
            if let Some(content) = attr_value(tag, "content") {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }

        search_from = tag_end;
    }

    None
}

/// Read a double-quoted attribute value out of a single tag's text
fn attr_value(tag: &str, attr: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let needle = format!("{attr}=\"");
    let start = lower.find(&needle)? + needle.len();
    let end = start + tag[start..].find('"')?;
    Some(tag[start..end].to_string())
}
