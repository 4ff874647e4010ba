//! Storefront CLI - terminal host for the catalog view

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storefront_core::ConfigOverrides;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, long_about = None)]
#[command(about = "Browse the book catalog and manage favorites")]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base URL (overrides STOREFRONT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// File holding the session token (overrides STOREFRONT_TOKEN_FILE)
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the best selling books
    Browse {
        /// Show the full catalog instead of the first six books
        #[arg(long)]
        all: bool,

        /// Viewport width in pixels, selects the mobile or desktop layout
        #[arg(long, default_value = "1024")]
        width: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add or remove a book from favorites
    Favorite {
        #[arg(value_enum)]
        action: FavoriteCommand,

        /// Book identifier
        book_id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FavoriteCommand {
    Add,
    Remove,
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "storefront_cli=debug,storefront_core=debug"
    } else {
        "storefront_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let overrides = ConfigOverrides {
        base_url: cli.base_url,
        token_file: cli.token_file,
        request_timeout: None,
    };

    match cli.command {
        Commands::Browse { all, width, json } => {
            commands::browse(overrides, all, width, json).await
        }

        Commands::Favorite { action, book_id } => {
            commands::favorite(overrides, action, &book_id).await
        }
    }
}
