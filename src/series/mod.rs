//! Series detection
//!
//! A post belongs to a series when its primary tag slug starts with the
//! configured prefix (`series-` by default). Its position inside the series
//! is read from its own metadata, trying in turn:
//!
//! 1. a "part" word followed by a number in the title (`Part 3`, `파트 2`)
//! 2. a number followed by an "episode" word in the custom excerpt (`시리즈 2편`)
//! 3. a trailing `-<number>` on the slug
//!
//! Neighbours are looked up in the member list exactly as the caller
//! ordered it (publication date ascending when it comes from Ghost).

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::config::SeriesConfig;
use crate::content::{Post, Tag};

lazy_static! {
    static ref SLUG_ORDER: Regex = Regex::new(r"-([0-9]+)$").unwrap();
}

/// Classifies posts as series members and computes their position
#[derive(Debug, Clone)]
pub struct SeriesResolver {
    prefix: String,
    name_prefix: String,
    title_pattern: Option<Regex>,
    excerpt_pattern: Option<Regex>,
}

impl SeriesResolver {
    /// Compile the marker words of `config` into match patterns
    pub fn new(config: &SeriesConfig) -> Result<Self, regex::Error> {
        let title_pattern = alternation(&config.title_markers)
            .map(|markers| Regex::new(&format!(r"(?i)(?:{})\s*([0-9]+)", markers)))
            .transpose()?;

        let excerpt_pattern = alternation(&config.excerpt_markers)
            .map(|markers| {
                let lead = alternation(&config.series_words)
                    .map(|words| format!(r"(?:(?:{})\s*)?", words))
                    .unwrap_or_default();
                Regex::new(&format!(r"(?i){}([0-9]+)(?:{})", lead, markers))
            })
            .transpose()?;

        Ok(Self {
            prefix: config.prefix.clone(),
            name_prefix: config.name_prefix.clone(),
            title_pattern,
            excerpt_pattern,
        })
    }

    /// Whether a tag marks a series
    pub fn is_series_tag(&self, tag: &Tag) -> bool {
        tag.slug.starts_with(&self.prefix)
    }

    /// Whether the post's primary tag marks a series
    pub fn is_series_post(&self, post: &Post) -> bool {
        self.series_tag(post).is_some()
    }

    /// The primary tag of a series post
    pub fn series_tag<'a>(&self, post: &'a Post) -> Option<&'a Tag> {
        post.primary_tag.as_ref().filter(|t| self.is_series_tag(t))
    }

    /// Position of the post inside its series, read from its own fields
    pub fn extract_order(&self, post: &Post) -> Option<u32> {
        if let Some(caps) = self
            .title_pattern
            .as_ref()
            .and_then(|re| re.captures(&post.title))
        {
            return caps[1].parse().ok();
        }

        if let Some(caps) = self
            .excerpt_pattern
            .as_ref()
            .zip(post.custom_excerpt.as_deref())
            .and_then(|(re, excerpt)| re.captures(excerpt))
        {
            return caps[1].parse().ok();
        }

        SLUG_ORDER
            .captures(&post.slug)
            .and_then(|caps| caps[1].parse().ok())
    }

    /// Series name for display, e.g. `Series: React Hooks` -> `React Hooks`
    pub fn display_name(&self, tag: &Tag) -> String {
        tag.name.replacen(&self.name_prefix, "", 1)
    }

    /// Tags of a post that are ordinary topics rather than series markers
    pub fn topic_tags<'a>(&self, post: &'a Post) -> Vec<&'a Tag> {
        post.tags.iter().filter(|t| !self.is_series_tag(t)).collect()
    }

    /// Build the series panel for `post` from its member list
    ///
    /// Returns `None` for standalone posts. An empty member list (e.g. when
    /// fetching it failed) still yields a panel, just without position,
    /// progress or neighbours. `path_for` maps a member slug to its link.
    pub fn view<F>(&self, post: &Post, members: &[Post], path_for: F) -> Option<SeriesView>
    where
        F: Fn(&str) -> String,
    {
        let tag = self.series_tag(post)?;
        let order = self.extract_order(post).filter(|&n| n > 0);
        let total = members.len();

        let progress = match order {
            Some(n) if total > 0 => {
                let percent = (f64::from(n) / total as f64 * 100.0).round() as u32;
                Some(percent.min(100))
            }
            _ => None,
        };

        let entries = members
            .iter()
            .enumerate()
            .map(|(index, member)| SeriesEntry {
                order: self
                    .extract_order(member)
                    .filter(|&n| n > 0)
                    .unwrap_or(index as u32 + 1),
                slug: member.slug.clone(),
                path: path_for(&member.slug),
                title: member.title.clone(),
                excerpt: member.custom_excerpt.clone(),
                published_at: member.published_at,
                current: member.slug == post.slug,
            })
            .collect();

        Some(SeriesView {
            slug: tag.slug.clone(),
            name: self.display_name(tag),
            description: tag.description.clone().filter(|d| !d.is_empty()),
            order: if total > 0 { order } else { None },
            total,
            progress,
            previous: previous_of(members, &post.slug).map(|p| SeriesLink::new(p, &path_for)),
            next: next_of(members, &post.slug).map(|p| SeriesLink::new(p, &path_for)),
            entries,
        })
    }
}

/// The member before `slug`, if any
pub fn previous_of<'a>(members: &'a [Post], slug: &str) -> Option<&'a Post> {
    let index = members.iter().position(|p| p.slug == slug)?;
    index.checked_sub(1).and_then(|i| members.get(i))
}

/// The member after `slug`, if any
pub fn next_of<'a>(members: &'a [Post], slug: &str) -> Option<&'a Post> {
    let index = members.iter().position(|p| p.slug == slug)?;
    members.get(index + 1)
}

fn alternation(words: &[String]) -> Option<String> {
    let escaped: Vec<String> = words
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(w))
        .collect();
    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}

/// Series panel shown on a post page
#[derive(Debug, Clone, Serialize)]
pub struct SeriesView {
    /// Slug of the series tag
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    /// Position of the current post, when known and the member list is available
    pub order: Option<u32>,
    /// Number of posts in the series
    pub total: usize,
    /// Percentage of the series read up to this post
    pub progress: Option<u32>,
    pub previous: Option<SeriesLink>,
    pub next: Option<SeriesLink>,
    pub entries: Vec<SeriesEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesLink {
    pub slug: String,
    pub path: String,
    pub title: String,
}

impl SeriesLink {
    fn new<F: Fn(&str) -> String>(post: &Post, path_for: F) -> Self {
        Self {
            slug: post.slug.clone(),
            path: path_for(&post.slug),
            title: post.title.clone(),
        }
    }
}

/// One row of the series table of contents
#[derive(Debug, Clone, Serialize)]
pub struct SeriesEntry {
    pub order: u32,
    pub slug: String,
    pub path: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// Whether this is the post being viewed
    pub current: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> SeriesResolver {
        SeriesResolver::new(&SeriesConfig::default()).unwrap()
    }

    fn post(slug: &str, title: &str) -> Post {
        Post::new(slug, slug, title)
    }

    fn path(slug: &str) -> String {
        format!("/blog/{}", slug)
    }

    fn series_post(slug: &str, title: &str) -> Post {
        let mut p = post(slug, title);
        p.primary_tag = Some(Tag::new("t1", "series-react-hooks", "Series: React Hooks"));
        p
    }

    #[test]
    fn test_is_series_post() {
        let r = resolver();
        assert!(r.is_series_post(&series_post("a", "A")));

        let mut topic = post("b", "B");
        topic.primary_tag = Some(Tag::new("t2", "react", "React"));
        assert!(!r.is_series_post(&topic));

        assert!(!r.is_series_post(&post("c", "C")));
    }

    #[test]
    fn test_series_tag_only_considers_primary_tag() {
        let r = resolver();
        let mut p = post("a", "A");
        p.tags = vec![Tag::new("t1", "series-react", "Series: React")];
        assert!(!r.is_series_post(&p));
        assert!(r.series_tag(&p).is_none());
    }

    #[test]
    fn test_order_from_title() {
        let r = resolver();
        assert_eq!(r.extract_order(&post("x", "Part 3: Advanced Hooks")), Some(3));
        assert_eq!(r.extract_order(&post("x", "React part12 wrap-up")), Some(12));
        assert_eq!(r.extract_order(&post("x", "훅 파트 4")), Some(4));
        assert_eq!(r.extract_order(&post("x", "리액트 편 7")), Some(7));
    }

    #[test]
    fn test_title_uses_first_digit_run() {
        let r = resolver();
        assert_eq!(r.extract_order(&post("x", "Part 2 of Part 5")), Some(2));
    }

    #[test]
    fn test_order_from_custom_excerpt() {
        let r = resolver();
        let mut p = post("intro", "Getting started");
        p.custom_excerpt = Some("리액트 시리즈 2편입니다".to_string());
        assert_eq!(r.extract_order(&p), Some(2));

        p.custom_excerpt = Some("3부: 심화".to_string());
        assert_eq!(r.extract_order(&p), Some(3));
    }

    #[test]
    fn test_order_from_slug() {
        let r = resolver();
        assert_eq!(
            r.extract_order(&post("react-hooks-guide-5", "React Hooks Guide")),
            Some(5)
        );
    }

    #[test]
    fn test_title_beats_slug() {
        let r = resolver();
        assert_eq!(r.extract_order(&post("hooks-9", "Hooks Part 2")), Some(2));
    }

    #[test]
    fn test_overflowing_title_order_does_not_fall_back() {
        let r = resolver();
        assert_eq!(
            r.extract_order(&post("guide-4", "Part 99999999999 finale")),
            None
        );

        let mut p = post("guide-4", "Guide");
        p.custom_excerpt = Some("99999999999편".to_string());
        assert_eq!(r.extract_order(&p), None);
    }

    #[test]
    fn test_excerpt_beats_slug() {
        let r = resolver();
        let mut p = post("hooks-9", "Hooks");
        p.custom_excerpt = Some("4편".to_string());
        assert_eq!(r.extract_order(&p), Some(4));
    }

    #[test]
    fn test_no_order() {
        let r = resolver();
        let mut p = post("react-hooks", "Understanding Hooks");
        p.custom_excerpt = Some("A gentle introduction".to_string());
        assert_eq!(r.extract_order(&p), None);
        assert_eq!(r.extract_order(&post("hooks-9x", "Departure 2")), None);
    }

    #[test]
    fn test_extract_order_is_idempotent() {
        let r = resolver();
        let p = post("guide-5", "Part 3: Advanced Hooks");
        assert_eq!(r.extract_order(&p), r.extract_order(&p));
    }

    #[test]
    fn test_custom_markers() {
        let config = SeriesConfig {
            prefix: "seq-".to_string(),
            title_markers: vec!["Chapter".to_string()],
            excerpt_markers: vec![],
            series_words: vec![],
            name_prefix: String::new(),
        };
        let r = SeriesResolver::new(&config).unwrap();
        assert_eq!(r.extract_order(&post("x", "Chapter 6")), Some(6));
        assert_eq!(r.extract_order(&post("x", "Part 6")), None);

        let mut p = post("x", "X");
        p.custom_excerpt = Some("2편".to_string());
        assert_eq!(r.extract_order(&p), None);

        p.primary_tag = Some(Tag::new("t", "seq-rust", "Rust"));
        assert!(r.is_series_post(&p));
    }

    #[test]
    fn test_neighbours() {
        let members = vec![post("a", "A"), post("b", "B"), post("c", "C")];

        assert_eq!(previous_of(&members, "b").unwrap().slug, "a");
        assert_eq!(next_of(&members, "b").unwrap().slug, "c");

        assert!(previous_of(&members, "a").is_none());
        assert_eq!(next_of(&members, "a").unwrap().slug, "b");

        assert_eq!(previous_of(&members, "c").unwrap().slug, "b");
        assert!(next_of(&members, "c").is_none());
    }

    #[test]
    fn test_neighbours_of_unknown_slug() {
        let members = vec![post("a", "A"), post("b", "B")];
        assert!(previous_of(&members, "zzz").is_none());
        assert!(next_of(&members, "zzz").is_none());
        assert!(previous_of(&[], "a").is_none());
        assert!(next_of(&[], "a").is_none());
    }

    #[test]
    fn test_display_name_and_topic_tags() {
        let r = resolver();
        let mut p = series_post("a", "A");
        p.tags = vec![
            Tag::new("t1", "series-react-hooks", "Series: React Hooks"),
            Tag::new("t2", "react", "React"),
        ];
        let tag = r.series_tag(&p).unwrap();
        assert_eq!(r.display_name(tag), "React Hooks");

        let topics: Vec<_> = r.topic_tags(&p).iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(topics, vec!["react"]);
    }

    #[test]
    fn test_view_for_standalone_post() {
        let r = resolver();
        assert!(r.view(&post("a", "A"), &[], path).is_none());
    }

    #[test]
    fn test_view_for_series_member() {
        let r = resolver();
        let members = vec![
            series_post("hooks-intro", "Hooks Part 1"),
            series_post("hooks-state", "Hooks Part 2"),
            series_post("hooks-effects", "Side effects"),
            series_post("hooks-custom", "Custom hooks"),
        ];
        let current = members[1].clone();

        let view = r.view(&current, &members, path).unwrap();
        assert_eq!(view.name, "React Hooks");
        assert_eq!(view.order, Some(2));
        assert_eq!(view.total, 4);
        assert_eq!(view.progress, Some(50));
        assert_eq!(view.previous.as_ref().unwrap().slug, "hooks-intro");
        assert_eq!(view.next.as_ref().unwrap().slug, "hooks-effects");
        assert_eq!(view.next.as_ref().unwrap().path, "/blog/hooks-effects");

        let orders: Vec<u32> = view.entries.iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert!(view.entries[1].current);
        assert!(!view.entries[0].current);
    }

    #[test]
    fn test_view_without_members() {
        let r = resolver();
        let current = series_post("hooks", "Hooks Part 2");
        let view = r.view(&current, &[], path).unwrap();
        assert_eq!(view.order, None);
        assert_eq!(view.total, 0);
        assert_eq!(view.progress, None);
        assert!(view.previous.is_none());
        assert!(view.next.is_none());
        assert!(view.entries.is_empty());
    }

    #[test]
    fn test_view_progress_is_capped() {
        let r = resolver();
        let members = vec![series_post("a", "A"), series_post("b-9", "B")];
        let view = r.view(&members[1], &members, path).unwrap();
        assert_eq!(view.order, Some(9));
        assert_eq!(view.progress, Some(100));
    }

    #[test]
    fn test_view_treats_order_zero_as_unknown() {
        let r = resolver();
        let members = vec![
            series_post("hooks-intro", "Hooks Part 1"),
            series_post("hooks-zero", "PART 0"),
            series_post("hooks-end", "Hooks Part 3"),
        ];
        assert_eq!(r.extract_order(&members[1]), Some(0));

        let view = r.view(&members[1], &members, path).unwrap();
        assert_eq!(view.order, None);
        assert_eq!(view.progress, None);
        assert_eq!(view.total, 3);
        assert_eq!(view.entries[1].order, 2);
        assert!(view.entries[1].current);
    }

    #[test]
    fn test_view_uses_given_paths() {
        let r = resolver();
        let members = vec![series_post("a", "Part 1"), series_post("b", "Part 2")];
        let view = r
            .view(&members[1], &members, |slug| format!("/root/blog/{}", slug))
            .unwrap();
        assert_eq!(view.previous.unwrap().path, "/root/blog/a");
        assert_eq!(view.entries[1].path, "/root/blog/b");
    }
}
