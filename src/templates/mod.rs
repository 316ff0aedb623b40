//! Built-in theme templates using Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{MenuItem, SiteConfig};
use crate::helpers::{
    self, is_external, korean_long_date, korean_numeric_date, korean_short_date,
};

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    ///
    /// `timezone` is the zone the `local_date` filter renders timestamps in.
    pub fn new(timezone: Tz) -> Result<Self> {
        let mut tera = Tera::default();

        // Paths are built by us and must stay verbatim; text coming from Ghost
        // or the config goes through the `escape` filter in the templates
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("post.html", include_str!("theme/post.html")),
            ("tag.html", include_str!("theme/tag.html")),
            ("not_found.html", include_str!("theme/not_found.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("theme/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("theme/partials/footer.html"),
            ),
            (
                "partials/post_card.html",
                include_str!("theme/partials/post_card.html"),
            ),
            (
                "partials/series.html",
                include_str!("theme/partials/series.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter(
            "local_date",
            move |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                local_date_filter(timezone, value, args)
            },
        );

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    Ok(tera::Value::String(helpers::truncate(
        &s,
        length,
        Some(&omission),
    )))
}

/// Tera filter: render an RFC 3339 timestamp in the site timezone
///
/// `style` is one of `long` (default), `short`, `numeric` or `iso`.
fn local_date_filter(
    timezone: Tz,
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("local_date", "value", String, value);
    let style = match args.get("style") {
        Some(val) => tera::try_get_value!("local_date", "style", String, val),
        None => "long".to_string(),
    };

    let date = DateTime::parse_from_rfc3339(&s)
        .map_err(|e| tera::Error::msg(format!("local_date: invalid timestamp {:?}: {}", s, e)))?
        .with_timezone(&timezone);

    let formatted = match style.as_str() {
        "short" => korean_short_date(&date),
        "numeric" => korean_numeric_date(&date),
        "iso" => helpers::date_xml(&date),
        _ => korean_long_date(&date),
    };
    Ok(tera::Value::String(formatted))
}

// Data structures for template context

/// Site-wide chrome shared by every page
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub home: String,
    pub year: i32,
    pub menu: Vec<NavLink>,
    pub footer: FooterData,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            home: helpers::url_for(config, "/"),
            year: Utc::now().year(),
            menu: config.menu.iter().map(|m| NavLink::new(config, m)).collect(),
            footer: FooterData {
                intro: config.footer.intro.clone(),
                sections: config
                    .footer
                    .sections
                    .iter()
                    .map(|s| FooterSectionData {
                        title: s.title.clone(),
                        links: s.links.iter().map(|l| NavLink::new(config, l)).collect(),
                    })
                    .collect(),
                social: config
                    .footer
                    .social
                    .iter()
                    .map(|s| NavLink::new(config, &MenuItem::new(&s.label, &s.href)))
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub title: String,
    pub href: String,
    pub external: bool,
    pub items: Vec<NavLink>,
}

impl NavLink {
    fn new(config: &SiteConfig, item: &MenuItem) -> Self {
        let external = is_external(&item.href);
        let href = if external {
            item.href.clone()
        } else {
            helpers::url_for(config, &item.href)
        };
        Self {
            title: item.title.clone(),
            href,
            external,
            items: item.items.iter().map(|i| NavLink::new(config, i)).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterData {
    pub intro: String,
    pub sections: Vec<FooterSectionData>,
    pub social: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterSectionData {
    pub title: String,
    pub links: Vec<NavLink>,
}

/// A post as shown in listings
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    pub path: String,
    pub date: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub excerpt: Option<String>,
    pub feature_image: Option<String>,
    pub featured: bool,
}

/// A tag link
#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub path: String,
}
