//! Post, Tag and Author models as served by the Ghost Content API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post
///
/// Only `id`, `slug` and `title` are guaranteed. Everything else may be
/// missing, either because the author never set it or because the request
/// projected the post down to a reduced field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Ghost object id
    pub id: String,

    /// URL-friendly name, unique across the site
    pub slug: String,

    /// Post title
    pub title: String,

    /// Rendered HTML body
    #[serde(default)]
    pub html: Option<String>,

    /// Plain-text body
    #[serde(default)]
    pub plaintext: Option<String>,

    /// Generated excerpt
    #[serde(default)]
    pub excerpt: Option<String>,

    /// Excerpt written by the author
    #[serde(default)]
    pub custom_excerpt: Option<String>,

    #[serde(default)]
    pub feature_image: Option<String>,

    #[serde(default)]
    pub feature_image_alt: Option<String>,

    #[serde(default)]
    pub feature_image_caption: Option<String>,

    #[serde(default)]
    pub featured: bool,

    /// Estimated reading time in minutes
    #[serde(default)]
    pub reading_time: Option<u32>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// The post's principal tag
    #[serde(default)]
    pub primary_tag: Option<Tag>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub primary_author: Option<Author>,

    #[serde(default)]
    pub authors: Vec<Author>,
}

impl Post {
    /// Create a post with only the required fields set
    pub fn new(id: &str, slug: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            html: None,
            plaintext: None,
            excerpt: None,
            custom_excerpt: None,
            feature_image: None,
            feature_image_alt: None,
            feature_image_caption: None,
            featured: false,
            reading_time: None,
            created_at: None,
            updated_at: None,
            published_at: None,
            primary_tag: None,
            tags: Vec::new(),
            primary_author: None,
            authors: Vec::new(),
        }
    }

    /// Date shown to readers: publication date, falling back to creation date
    pub fn display_date(&self) -> Option<DateTime<Utc>> {
        self.published_at.or(self.created_at)
    }

    /// Excerpt shown in listings: custom excerpt first, then the generated one
    pub fn summary(&self) -> Option<&str> {
        self.custom_excerpt
            .as_deref()
            .or(self.excerpt.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Author shown on the post: primary author, else the first listed author
    pub fn author(&self) -> Option<&Author> {
        self.primary_author.as_ref().or_else(|| self.authors.first())
    }

    /// Whether the post carries a tag with the given slug
    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t.slug == slug)
            || self.primary_tag.as_ref().is_some_and(|t| t.slug == slug)
    }
}

/// A classification label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub slug: String,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Post counts, present only when requested with `include=count.posts`
    #[serde(default)]
    pub count: Option<TagCount>,
}

impl Tag {
    pub fn new(id: &str, slug: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            slug: slug.to_string(),
            name: name.to_string(),
            description: None,
            count: None,
        }
    }

    /// Number of posts using this tag, if the API reported it
    pub fn post_count(&self) -> Option<u32> {
        self.count.as_ref().map(|c| c.posts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub posts: u32,
}

/// A post author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub slug: String,
    pub name: String,

    #[serde(default)]
    pub profile_image: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_full_post() {
        let json = r#"{
            "id": "1",
            "uuid": "abc",
            "slug": "react-hooks-1",
            "title": "React Hooks Part 1",
            "html": "<p>Hello</p>",
            "custom_excerpt": null,
            "featured": true,
            "reading_time": 4,
            "created_at": "2024-01-10T09:00:00.000+00:00",
            "published_at": "2024-01-15T10:30:00.000+09:00",
            "primary_tag": {"id": "t1", "slug": "series-react", "name": "Series: React"},
            "tags": [
                {"id": "t1", "slug": "series-react", "name": "Series: React"},
                {"id": "t2", "slug": "javascript", "name": "JavaScript", "description": "JS"}
            ],
            "primary_author": {"id": "a1", "slug": "kevin", "name": "Kevin"}
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.slug, "react-hooks-1");
        assert!(post.featured);
        assert_eq!(post.reading_time, Some(4));
        assert_eq!(post.custom_excerpt, None);
        assert_eq!(
            post.published_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 1, 30, 0).unwrap())
        );
        assert_eq!(post.primary_tag.as_ref().unwrap().slug, "series-react");
        assert_eq!(post.tags.len(), 2);
        assert_eq!(post.tags[1].description.as_deref(), Some("JS"));
        assert_eq!(post.author().unwrap().name, "Kevin");
    }

    #[test]
    fn test_deserialize_projected_post() {
        let json = r#"{"id": "2", "slug": "intro", "title": "Intro", "published_at": null}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.html.is_none());
        assert!(post.tags.is_empty());
        assert!(post.display_date().is_none());
    }

    #[test]
    fn test_display_date_falls_back_to_created() {
        let mut post = Post::new("1", "a", "A");
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        post.created_at = Some(created);
        assert_eq!(post.display_date(), Some(created));

        let published = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        post.published_at = Some(published);
        assert_eq!(post.display_date(), Some(published));
    }

    #[test]
    fn test_summary_prefers_custom_excerpt() {
        let mut post = Post::new("1", "a", "A");
        post.excerpt = Some("generated".to_string());
        assert_eq!(post.summary(), Some("generated"));
        post.custom_excerpt = Some("custom".to_string());
        assert_eq!(post.summary(), Some("custom"));
    }

    #[test]
    fn test_tag_count() {
        let tag: Tag =
            serde_json::from_str(r#"{"id":"t","slug":"rust","name":"Rust","count":{"posts":7}}"#)
                .unwrap();
        assert_eq!(tag.post_count(), Some(7));
        assert_eq!(Tag::new("t", "go", "Go").post_count(), None);
    }
}
