//! CLI entry point for ghost-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ghost-blog")]
#[command(version)]
#[command(about = "A blog front-end for the Ghost Content API", long_about = None)]
struct Cli {
    /// Set the site directory holding _config.yml (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Read posts from a JSON fixture instead of the Ghost API
    #[arg(short, long, global = true)]
    fixture: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// List site information
    List {
        /// Type of content to list (post, tag, series)
        #[arg(default_value = "post")]
        r#type: String,

        /// Maximum number of posts to list
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a post and its series position
    Show {
        /// Slug of the post
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "ghost_blog=debug,info"
    } else {
        "ghost_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let fixture = cli.fixture.as_deref();

    match cli.command {
        Commands::Server { port, ip, open } => {
            let blog = ghost_blog::Blog::new(&base_dir)?;
            let source = blog.content_source(fixture)?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            ghost_blog::server::start(&blog, source, &ip, port, open).await?;
        }

        Commands::List { r#type, limit } => {
            let blog = ghost_blog::Blog::new(&base_dir)?;
            let source = blog.content_source(fixture)?;
            let limit = limit.unwrap_or(blog.config.per_page);
            ghost_blog::commands::list::run(&blog, source.as_ref(), &r#type, limit).await?;
        }

        Commands::Show { slug } => {
            let blog = ghost_blog::Blog::new(&base_dir)?;
            let source = blog.content_source(fixture)?;
            ghost_blog::commands::show::run(&blog, source.as_ref(), &slug).await?;
        }

        Commands::Version => {
            println!("ghost-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
