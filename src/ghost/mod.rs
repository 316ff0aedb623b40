//! Ghost Content API access
//!
//! Pages never talk to Ghost directly: they go through a [`ContentSource`],
//! which is either the HTTP [`GhostClient`] or an in-memory
//! [`MemorySource`] used for offline previews and tests.

mod client;
mod error;
mod memory;

use async_trait::async_trait;

pub use client::GhostClient;
pub use error::{GhostError, Result};
pub use memory::MemorySource;

use crate::content::{Post, Tag};

/// Read-only access to blog content
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// A single post with its tags, authors and HTML body
    async fn post_by_slug(&self, slug: &str) -> Result<Post>;

    /// Every post whose primary tag is `tag_slug`, oldest first
    async fn series_posts(&self, tag_slug: &str) -> Result<Vec<Post>>;

    /// The newest `limit` posts
    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>>;

    /// Every post carrying `tag_slug`, newest first
    async fn posts_by_tag(&self, tag_slug: &str) -> Result<Vec<Post>>;

    async fn tag_by_slug(&self, slug: &str) -> Result<Tag>;

    /// Every tag, with post counts
    async fn tags(&self) -> Result<Vec<Tag>>;
}
