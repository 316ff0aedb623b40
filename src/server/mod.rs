//! HTTP front-end
//!
//! Every request fetches what it needs from the content source and renders
//! it; nothing is cached between requests. A post that cannot be fetched,
//! for whatever reason, is answered with the not-found page.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tera::Context;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::ghost::ContentSource;
use crate::helpers::{html_escape, Helpers};
use crate::series::SeriesResolver;
use crate::templates::{PostCard, SiteData, TagLink, TemplateRenderer};
use crate::Blog;

/// Shared, read-only state of the running server
pub struct AppState {
    source: Arc<dyn ContentSource>,
    renderer: TemplateRenderer,
    resolver: SeriesResolver,
    helpers: Helpers,
    site: SiteData,
    per_page: usize,
}

impl AppState {
    pub fn new(config: &SiteConfig, source: Arc<dyn ContentSource>) -> Result<Self> {
        let helpers = Helpers::new(config.clone());
        Ok(Self {
            source,
            renderer: TemplateRenderer::new(helpers.timezone())?,
            resolver: SeriesResolver::new(&config.series)?,
            site: SiteData::from_config(config),
            helpers,
            per_page: config.per_page,
        })
    }

    fn context(&self, page_title: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("page_title", page_title);
        context.insert("canonical", &self.helpers.home_url());
        context
    }

    fn card(&self, post: &Post) -> PostCard {
        PostCard {
            title: post.title.clone(),
            path: self.helpers.post_path(&post.slug),
            date: post.display_date(),
            author: post.author().map(|a| a.name.clone()),
            excerpt: post.summary().map(str::to_string),
            feature_image: post.feature_image.clone(),
            featured: post.featured,
        }
    }

    fn render(&self, template: &str, context: &Context, status: StatusCode) -> Response {
        match self.renderer.render(template, context) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render {}: {:#}", template, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(format!(
                        "<h1>Server error</h1><p>{}</p>",
                        html_escape(&e.to_string())
                    )),
                )
                    .into_response()
            }
        }
    }

    fn not_found(&self) -> Response {
        let context = self.context("Not found");
        self.render("not_found.html", &context, StatusCode::NOT_FOUND)
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route("/", get(index_handler))
        .route("/blog/:slug", get(post_handler))
        .route("/tag/:slug", get(tag_handler))
        .fallback(fallback_handler);

    if let Some(dir) = static_dir {
        tracing::debug!("Serving assets from {:?}", dir);
        app = app.nest_service("/assets", ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Start the server
pub async fn start(
    blog: &Blog,
    source: Arc<dyn ContentSource>,
    ip: &str,
    port: u16,
    open: bool,
) -> Result<()> {
    let state = Arc::new(AppState::new(&blog.config, source)?);
    let static_dir = blog.static_dir().filter(|dir| dir.is_dir());
    let app = router(state, static_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Home page: the newest posts
async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let posts = match state.source.recent_posts(state.per_page).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::warn!("Failed to fetch recent posts: {}", e);
            return state.not_found();
        }
    };

    let mut context = state.context("");
    let cards: Vec<PostCard> = posts.iter().map(|p| state.card(p)).collect();
    context.insert("posts", &cards);
    state.render("index.html", &context, StatusCode::OK)
}

/// Post detail page, with the series panel when the post belongs to one
async fn post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    let post = match state.source.post_by_slug(&slug).await {
        Ok(post) => post,
        Err(e) if e.is_not_found() => {
            tracing::debug!("Post {} not found", slug);
            return state.not_found();
        }
        Err(e) => {
            tracing::warn!("Failed to fetch post {}: {}", slug, e);
            return state.not_found();
        }
    };

    let members = match state.resolver.series_tag(&post) {
        Some(tag) => match state.source.series_posts(&tag.slug).await {
            Ok(members) => members,
            Err(e) => {
                tracing::warn!("Failed to fetch series {}: {}", tag.slug, e);
                Vec::new()
            }
        },
        None => Vec::new(),
    };
    let series = state
        .resolver
        .view(&post, &members, |slug| state.helpers.post_path(slug));

    let tags: Vec<TagLink> = state
        .resolver
        .topic_tags(&post)
        .into_iter()
        .map(|t| TagLink {
            name: t.name.clone(),
            path: state.helpers.tag_path(&t.slug),
        })
        .collect();

    let mut context = state.context(&post.title);
    context.insert("date", &post.display_date());
    context.insert("author", &post.author().map(|a| a.name.as_str()));
    context.insert("tags", &tags);
    context.insert("series", &series);
    context.insert("canonical", &state.helpers.post_url(&post.slug));
    context.insert("post", &post);
    state.render("post.html", &context, StatusCode::OK)
}

/// Tag page: every post carrying the tag
async fn tag_handler(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let tag = match state.source.tag_by_slug(&slug).await {
        Ok(tag) => tag,
        Err(e) => {
            tracing::debug!("Tag {} unavailable: {}", slug, e);
            return state.not_found();
        }
    };
    let posts = match state.source.posts_by_tag(&tag.slug).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::warn!("Failed to fetch posts for tag {}: {}", tag.slug, e);
            return state.not_found();
        }
    };

    let mut context = state.context(&tag.name);
    let cards: Vec<PostCard> = posts.iter().map(|p| state.card(p)).collect();
    context.insert("tag", &tag);
    context.insert("posts", &cards);
    state.render("tag.html", &context, StatusCode::OK)
}

async fn fallback_handler(State(state): State<Arc<AppState>>) -> Response {
    state.not_found()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
