//! In-memory content source
//!
//! Serves a fixed set of posts with the same filtering and ordering the
//! Content API applies. Fixture files use the API's own `{"posts": [...]}`
//! envelope, so a saved browse response can be replayed offline.

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::{GhostError, Result};
use super::ContentSource;
use crate::content::{Post, Tag, TagCount};

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    posts: Vec<Post>,
}

#[derive(Deserialize)]
struct Fixture {
    posts: Vec<Post>,
}

impl MemorySource {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Parse a `{"posts": [...]}` document
    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: Fixture = serde_json::from_str(json)?;
        Ok(Self::new(fixture.posts))
    }

    /// Load a fixture file
    pub fn load<P: AsRef<Path>>(path: P) -> AnyResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let source = Self::from_json(&content)?;
        tracing::debug!(
            "Loaded {} posts from {:?}",
            source.len(),
            path.as_ref()
        );
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts
    }

    /// Every distinct tag in first-seen order, with post counts
    fn collect_tags(&self) -> IndexMap<String, Tag> {
        let mut tags: IndexMap<String, Tag> = IndexMap::new();
        for post in &self.posts {
            let mut seen: Vec<&str> = Vec::new();
            for tag in post.primary_tag.iter().chain(post.tags.iter()) {
                if seen.contains(&tag.slug.as_str()) {
                    continue;
                }
                seen.push(&tag.slug);
                let entry = tags.entry(tag.slug.clone()).or_insert_with(|| Tag {
                    count: Some(TagCount { posts: 0 }),
                    ..tag.clone()
                });
                if let Some(count) = entry.count.as_mut() {
                    count.posts += 1;
                }
            }
        }
        tags
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn post_by_slug(&self, slug: &str) -> Result<Post> {
        self.posts
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| GhostError::NotFound(format!("post {}", slug)))
    }

    async fn series_posts(&self, tag_slug: &str) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| p.primary_tag.as_ref().is_some_and(|t| t.slug == tag_slug))
            .cloned()
            .collect();
        posts.sort_by_key(|p| p.published_at);
        Ok(posts)
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>> {
        let mut posts = Self::newest_first(self.posts.clone());
        posts.truncate(limit.max(1));
        Ok(posts)
    }

    async fn posts_by_tag(&self, tag_slug: &str) -> Result<Vec<Post>> {
        let posts = self
            .posts
            .iter()
            .filter(|p| p.has_tag(tag_slug))
            .cloned()
            .collect();
        Ok(Self::newest_first(posts))
    }

    async fn tag_by_slug(&self, slug: &str) -> Result<Tag> {
        self.collect_tags()
            .shift_remove(slug)
            .ok_or_else(|| GhostError::NotFound(format!("tag {}", slug)))
    }

    async fn tags(&self) -> Result<Vec<Tag>> {
        Ok(self.collect_tags().into_values().collect())
    }
}
