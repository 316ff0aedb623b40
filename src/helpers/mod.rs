//! Helper functions for pages
//!
//! URL building, date formatting and small HTML utilities shared by the
//! server handlers and the template filters.

mod date;
mod html;
mod url;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

pub use date::*;
pub use html::*;
pub use url::*;

use crate::config::SiteConfig;

/// Helpers bound to one site configuration
#[derive(Debug, Clone)]
pub struct Helpers {
    config: SiteConfig,
    timezone: Tz,
}

impl Helpers {
    /// Create a new helpers instance
    pub fn new(config: SiteConfig) -> Self {
        let timezone = parse_timezone(&config.timezone);
        Self { config, timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn url_for(&self, path: &str) -> String {
        url_for(&self.config, path)
    }

    pub fn post_path(&self, slug: &str) -> String {
        post_path(&self.config, slug)
    }

    pub fn tag_path(&self, slug: &str) -> String {
        tag_path(&self.config, slug)
    }

    /// Absolute URL of a post, for canonical links
    pub fn post_url(&self, slug: &str) -> String {
        full_url_for(&self.config, &format!("blog/{}", encode_segment(slug)))
    }

    /// Absolute URL of the home page
    pub fn home_url(&self) -> String {
        full_url_for(&self.config, "/")
    }

    /// Long date in the site timezone, e.g. "2024년 1월 15일"
    pub fn long_date(&self, date: &DateTime<Utc>) -> String {
        korean_long_date(&to_timezone(date, self.timezone))
    }

    /// Format with a Moment.js pattern, defaulting to the configured one
    pub fn date(&self, date: &DateTime<Utc>, format: Option<&str>) -> String {
        format_date(
            &to_timezone(date, self.timezone),
            format.unwrap_or(&self.config.date_format),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_helpers_use_site_timezone() {
        let helpers = Helpers::new(SiteConfig::default());
        let date = Utc.with_ymd_and_hms(2024, 12, 31, 16, 0, 0).unwrap();
        assert_eq!(helpers.long_date(&date), "2025년 1월 1일");
        assert_eq!(helpers.date(&date, None), "2025-01-01");
        assert_eq!(helpers.date(&date, Some("HH:mm")), "01:00");
    }

    #[test]
    fn test_helpers_paths() {
        let helpers = Helpers::new(SiteConfig::default());
        assert_eq!(helpers.post_path("a"), "/blog/a");
        assert_eq!(helpers.tag_path("b"), "/tag/b");
        assert_eq!(helpers.url_for(""), "/");
        assert_eq!(helpers.post_url("a b"), "http://localhost:4000/blog/a%20b");
        assert_eq!(helpers.home_url(), "http://localhost:4000/");
    }
}
