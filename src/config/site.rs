//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding `ghost.url`
pub const GHOST_URL_ENV: &str = "GHOST_URL";
/// Environment variable overriding `ghost.key`
pub const GHOST_API_KEY_ENV: &str = "GHOST_API_KEY";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Date format used in listings (Moment.js style)
    pub date_format: String,

    // Home page
    pub per_page: usize,

    // Directory served under /assets, relative to the site directory
    pub static_dir: Option<String>,

    // Content API
    pub ghost: GhostConfig,

    // Series detection
    pub series: SeriesConfig,

    // Chrome
    pub menu: Vec<MenuItem>,
    pub footer: FooterConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "DevBlog".to_string(),
            description: String::new(),
            author: "Kevin".to_string(),
            language: "ko".to_string(),
            timezone: "Asia/Seoul".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            date_format: "YYYY-MM-DD".to_string(),

            per_page: 10,

            static_dir: None,

            ghost: GhostConfig::default(),
            series: SeriesConfig::default(),

            menu: vec![
                MenuItem::new("Home", "/"),
                MenuItem::new("About", "/about"),
                MenuItem::new("Contact", "/contact"),
            ],
            footer: FooterConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Replace Ghost credentials with values from the environment, when set
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(GHOST_URL_ENV).ok(),
            std::env::var(GHOST_API_KEY_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, url: Option<String>, key: Option<String>) {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            tracing::debug!("Using Ghost URL from {}", GHOST_URL_ENV);
            self.ghost.url = url;
        }
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            tracing::debug!("Using Ghost API key from {}", GHOST_API_KEY_ENV);
            self.ghost.key = key;
        }
    }
}

/// Ghost Content API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    /// Site URL, e.g. `https://demo.ghost.io`
    pub url: String,
    /// Content API key
    pub key: String,
    /// Value sent in the `Accept-Version` header
    pub version: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            version: "v5.0".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Conventions used to recognise series posts and their position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// Primary tag slug prefix marking a series
    pub prefix: String,
    /// Words meaning "part" that precede a number in titles
    pub title_markers: Vec<String>,
    /// Words meaning "episode"/"part" that follow a number in custom excerpts
    pub excerpt_markers: Vec<String>,
    /// Words meaning "series" that may precede the number in custom excerpts
    pub series_words: Vec<String>,
    /// Prefix stripped from the series tag name for display
    pub name_prefix: String,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            prefix: "series-".to_string(),
            title_markers: vec!["Part".to_string(), "파트".to_string(), "편".to_string()],
            excerpt_markers: vec!["편".to_string(), "부".to_string()],
            series_words: vec!["시리즈".to_string()],
            name_prefix: "Series: ".to_string(),
        }
    }
}

/// Navigation entry, optionally with a dropdown of children
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    pub href: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(title: &str, href: &str) -> Self {
        Self {
            title: title.to_string(),
            href: href.to_string(),
            items: Vec::new(),
        }
    }
}

/// Footer content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Short introduction shown next to the site name
    pub intro: String,
    pub sections: Vec<FooterSection>,
    pub social: Vec<SocialLink>,
}

/// A titled column of footer links
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterSection {
    pub title: String,
    #[serde(default)]
    pub links: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "DevBlog");
        assert_eq!(config.per_page, 10);
        assert_eq!(config.ghost.version, "v5.0");
        assert_eq!(config.series.prefix, "series-");
        assert_eq!(config.series.name_prefix, "Series: ");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
per_page: 5
ghost:
  url: https://demo.ghost.io
  key: abc123
series:
  prefix: "seq-"
menu:
  - title: Home
    href: /
  - title: Posts
    href: /posts
    items:
      - title: React
        href: /tag/react
footer:
  intro: Hello
  social:
    - label: GitHub
      href: https://github.com/example
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.ghost.url, "https://demo.ghost.io");
        assert_eq!(config.ghost.version, "v5.0");
        assert_eq!(config.series.prefix, "seq-");
        assert_eq!(config.series.excerpt_markers, vec!["편", "부"]);
        assert_eq!(config.menu[1].items[0].href, "/tag/react");
        assert_eq!(config.footer.social[0].label, "GitHub");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: From File\ntimezone: UTC\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "From File");
        assert_eq!(config.timezone, "UTC");
    }

    #[test]
    fn test_overrides_replace_credentials() {
        let mut config = SiteConfig::default();
        config.ghost.url = "https://old.example".to_string();

        config.apply_overrides(Some("https://new.example".to_string()), Some(String::new()));
        assert_eq!(config.ghost.url, "https://new.example");
        assert_eq!(config.ghost.key, "");

        config.apply_overrides(None, Some("key".to_string()));
        assert_eq!(config.ghost.url, "https://new.example");
        assert_eq!(config.ghost.key, "key");
    }
}
