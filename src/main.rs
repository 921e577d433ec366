//! CLI entry point for notion-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notion_blog::config::BlogConfig;
use notion_blog::helpers::PostFilter;
use notion_blog::NotionBlog;

#[derive(Parser)]
#[command(name = "notion-blog")]
#[command(version)]
#[command(about = "Serve blog posts stored in a Notion database", long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = "_config.yml")]
    config: PathBuf,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, tags or categories
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, category)
        #[arg(short, long, default_value = "post")]
        r#type: String,

        /// Only show posts in this category
        #[arg(long)]
        category: Option<String>,

        /// Only show posts whose title, description or tags match
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a single post
    Show {
        /// Notion page ID
        id: String,

        /// Print the full rendered HTML
        #[arg(long)]
        content: bool,
    },

    /// Check the Notion configuration and connection
    Check,

    /// Start the JSON API server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "notion_blog=debug,info"
    } else {
        "notion_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::List {
            r#type,
            category,
            search,
        } => {
            let blog = load(&cli.config)?;
            let filter = PostFilter {
                category,
                q: search,
            };
            notion_blog::commands::list::run(&blog, &r#type, &filter).await?;
        }

        Commands::Show { id, content } => {
            let blog = load(&cli.config)?;
            notion_blog::commands::show::run(&blog, &id, content).await?;
        }

        Commands::Check => {
            let config = BlogConfig::from_env(&cli.config)?;
            notion_blog::commands::check::run(config).await?;
        }

        Commands::Server { port, ip } => {
            let blog = load(&cli.config)?;
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);
            tracing::info!("Starting server at http://{}:{}", ip, port);
            notion_blog::server::start(&blog, &ip, port).await?;
        }

        Commands::Version => {
            println!("notion-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Load configuration and connect to Notion
fn load(config_path: &Path) -> Result<NotionBlog> {
    let config = BlogConfig::from_env(config_path)?;
    NotionBlog::new(config)
}
