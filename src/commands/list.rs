//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::ghost::ContentSource;
use crate::helpers::Helpers;
use crate::series::SeriesResolver;
use crate::Blog;

/// List site content by type
pub async fn run(
    blog: &Blog,
    source: &dyn ContentSource,
    content_type: &str,
    limit: usize,
) -> Result<()> {
    let helpers = Helpers::new(blog.config.clone());
    let resolver = blog.resolver()?;

    let output = match content_type {
        "post" | "posts" => list_posts(source, &helpers, limit).await?,
        "tag" | "tags" => list_tags(source).await?,
        "series" => list_series(source, &resolver).await?,
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, series",
                content_type
            );
        }
    };

    print!("{}", output);
    Ok(())
}

async fn list_posts(source: &dyn ContentSource, helpers: &Helpers, limit: usize) -> Result<String> {
    let posts = source.recent_posts(limit).await?;
    let mut out = String::new();
    writeln!(out, "Posts ({}):", posts.len())?;
    for post in posts {
        let date = post
            .display_date()
            .map(|d| helpers.date(&d, None))
            .unwrap_or_else(|| "----------".to_string());
        writeln!(out, "  {} - {} [{}]", date, post.title, post.slug)?;
    }
    Ok(out)
}

async fn list_tags(source: &dyn ContentSource) -> Result<String> {
    let mut tags = source.tags().await?;
    tags.sort_by(|a, b| b.post_count().cmp(&a.post_count()));

    let mut out = String::new();
    writeln!(out, "Tags ({}):", tags.len())?;
    for tag in tags {
        match tag.post_count() {
            Some(count) => writeln!(out, "  {} ({})", tag.name, count)?,
            None => writeln!(out, "  {}", tag.name)?,
        }
    }
    Ok(out)
}

async fn list_series(source: &dyn ContentSource, resolver: &SeriesResolver) -> Result<String> {
    let tags: Vec<_> = source
        .tags()
        .await?
        .into_iter()
        .filter(|t| resolver.is_series_tag(t))
        .collect();

    let mut out = String::new();
    writeln!(out, "Series ({}):", tags.len())?;
    for tag in tags {
        let members = source.series_posts(&tag.slug).await?;
        writeln!(
            out,
            "  {} [{}] - {} posts",
            resolver.display_name(&tag),
            tag.slug,
            members.len()
        )?;
        for (index, post) in members.iter().enumerate() {
            let order = resolver
                .extract_order(post)
                .filter(|&n| n > 0)
                .unwrap_or(index as u32 + 1);
            writeln!(out, "    {}. {} [{}]", order, post.title, post.slug)?;
        }
    }
    Ok(out)
}
