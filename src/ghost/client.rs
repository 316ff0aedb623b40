//! Ghost Content API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::{GhostError, Result};
use super::ContentSource;
use crate::config::GhostConfig;
use crate::content::{Post, Tag};
use crate::helpers::encode_segment;

/// Fields requested for series member lists.
const SERIES_FIELDS: &str = "id,title,slug,published_at,custom_excerpt";

/// Client for the read-only Ghost Content API.
#[derive(Clone)]
pub struct GhostClient {
    client: reqwest::Client,
    base_url: String,
    key: String,
    version: String,
}

#[derive(Deserialize)]
struct PostsEnvelope {
    posts: Vec<Post>,
}

#[derive(Deserialize)]
struct TagsEnvelope {
    tags: Vec<Tag>,
}

#[derive(Deserialize)]
struct ErrorsEnvelope {
    errors: Vec<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    context: Option<String>,
}

impl GhostClient {
    /// Create a client from connection settings.
    pub fn new(config: &GhostConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(GhostError::Config(
                "Ghost URL is not set (ghost.url or GHOST_URL)".to_string(),
            ));
        }
        if config.key.trim().is_empty() {
            return Err(GhostError::Config(
                "Ghost Content API key is not set (ghost.key or GHOST_API_KEY)".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/ghost/api/content", config.url.trim_end_matches('/')),
            key: config.key.clone(),
            version: config.version.clone(),
        })
    }

    /// Content API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .header("Accept-Version", &self.version)
            .query(&[("key", self.key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GhostError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GhostError::Status {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or(body),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ContentSource for GhostClient {
    async fn post_by_slug(&self, slug: &str) -> Result<Post> {
        let path = format!("posts/slug/{}/", encode_segment(slug));
        let envelope: PostsEnvelope = self
            .get(
                &path,
                &[("include", "tags,authors"), ("formats", "html,plaintext")],
            )
            .await?;

        envelope
            .posts
            .into_iter()
            .next()
            .ok_or_else(|| GhostError::NotFound(format!("post {}", slug)))
    }

    async fn series_posts(&self, tag_slug: &str) -> Result<Vec<Post>> {
        let filter = format!("primary_tag:{}", filter_value(tag_slug)?);
        let envelope: PostsEnvelope = self
            .get(
                "posts/",
                &[
                    ("filter", filter.as_str()),
                    ("order", "published_at asc"),
                    ("include", "tags"),
                    ("fields", SERIES_FIELDS),
                    ("limit", "all"),
                ],
            )
            .await?;
        Ok(envelope.posts)
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>> {
        let limit = limit.max(1).to_string();
        let envelope: PostsEnvelope = self
            .get(
                "posts/",
                &[
                    ("limit", limit.as_str()),
                    ("include", "tags,authors"),
                    ("order", "published_at desc"),
                ],
            )
            .await?;
        Ok(envelope.posts)
    }

    async fn posts_by_tag(&self, tag_slug: &str) -> Result<Vec<Post>> {
        let filter = format!("tag:{}", filter_value(tag_slug)?);
        let envelope: PostsEnvelope = self
            .get(
                "posts/",
                &[
                    ("filter", filter.as_str()),
                    ("include", "tags,authors"),
                    ("order", "published_at desc"),
                    ("limit", "all"),
                ],
            )
            .await?;
        Ok(envelope.posts)
    }

    async fn tag_by_slug(&self, slug: &str) -> Result<Tag> {
        let path = format!("tags/slug/{}/", encode_segment(slug));
        let envelope: TagsEnvelope = self.get(&path, &[("include", "count.posts")]).await?;
        envelope
            .tags
            .into_iter()
            .next()
            .ok_or_else(|| GhostError::NotFound(format!("tag {}", slug)))
    }

    async fn tags(&self) -> Result<Vec<Tag>> {
        let envelope: TagsEnvelope = self
            .get("tags/", &[("limit", "all"), ("include", "count.posts")])
            .await?;
        Ok(envelope.tags)
    }
}

/// Slugs are interpolated into NQL filters, so only plain slug characters pass
fn filter_value(slug: &str) -> Result<&str> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(slug)
    } else {
        Err(GhostError::NotFound(format!("invalid slug {:?}", slug)))
    }
}

/// Extract the first message from a Ghost `{"errors": [...]}` body
fn error_message(body: &str) -> Option<String> {
    let envelope: ErrorsEnvelope = serde_json::from_str(body).ok()?;
    let first = envelope.errors.into_iter().next()?;
    Some(match first.context {
        Some(context) if !context.is_empty() => format!("{} ({})", first.message, context),
        _ => first.message,
    })
}
