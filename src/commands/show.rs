//! Show one post and where it sits in its series

use anyhow::{Context, Result};
use std::fmt::Write;

use crate::content::Post;
use crate::ghost::ContentSource;
use crate::helpers::Helpers;
use crate::series::{SeriesResolver, SeriesView};
use crate::Blog;

pub async fn run(blog: &Blog, source: &dyn ContentSource, slug: &str) -> Result<()> {
    let helpers = Helpers::new(blog.config.clone());
    let resolver = blog.resolver()?;

    let post = source
        .post_by_slug(slug)
        .await
        .with_context(|| format!("Failed to fetch post {}", slug))?;

    let members = match resolver.series_tag(&post) {
        Some(tag) => source.series_posts(&tag.slug).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch series {}: {}", tag.slug, e);
            Vec::new()
        }),
        None => Vec::new(),
    };
    let view = resolver.view(&post, &members, |slug| helpers.post_path(slug));

    print!("{}", describe(&post, view.as_ref(), &resolver, &helpers)?);
    Ok(())
}

fn describe(
    post: &Post,
    series: Option<&SeriesView>,
    resolver: &SeriesResolver,
    helpers: &Helpers,
) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", post.title)?;
    writeln!(out, "  slug:    {}", post.slug)?;
    if let Some(date) = post.display_date() {
        writeln!(out, "  date:    {}", helpers.long_date(&date))?;
    }
    if let Some(author) = post.author() {
        writeln!(out, "  author:  {}", author.name)?;
    }
    if let Some(minutes) = post.reading_time {
        writeln!(out, "  reading: {} min", minutes)?;
    }
    let tags: Vec<&str> = resolver
        .topic_tags(post)
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    if !tags.is_empty() {
        writeln!(out, "  tags:    {}", tags.join(", "))?;
    }

    let Some(series) = series else {
        writeln!(out, "  series:  none")?;
        return Ok(out);
    };

    match series.order {
        Some(order) => writeln!(
            out,
            "  series:  {} ({}/{})",
            series.name, order, series.total
        )?,
        None => writeln!(out, "  series:  {}", series.name)?,
    }
    if let Some(previous) = &series.previous {
        writeln!(out, "  prev:    {} [{}]", previous.title, previous.slug)?;
    }
    if let Some(next) = &series.next {
        writeln!(out, "  next:    {} [{}]", next.title, next.slug)?;
    }
    Ok(out)
}
