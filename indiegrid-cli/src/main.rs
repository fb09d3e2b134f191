//! indiegrid CLI
//!
//! Command-line interface for browsing the indie game catalog and
//! submitting new listings.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use indiegrid_feed::GRID_PAGE_SIZE;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "indiegrid")]
#[command(about = "Browse and submit indie game listings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Common arguments for commands that filter the catalog.
#[derive(Args, Clone)]
struct FilterArgs {
    /// Genres to include (e.g., action,puzzle)
    #[arg(short, long, value_delimiter = ',')]
    genres: Option<Vec<String>>,

    /// Platforms to include (e.g., windows,linux,web)
    #[arg(short, long, value_delimiter = ',')]
    platforms: Option<Vec<String>>,

    /// Release statuses (released,early_access,demo_available,
    /// in_development,concept,updated)
    #[arg(long, value_delimiter = ',')]
    statuses: Option<Vec<String>>,

    /// Only show free games
    #[arg(long)]
    free: bool,

    /// Minimum price in dollars
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price in dollars
    #[arg(long)]
    max_price: Option<f64>,

    /// Sort key (trending, most-viewed, most-liked, highest-rated, newest,
    /// oldest, alphabetical, release-date, price-asc, price-desc)
    #[arg(short, long, default_value = "trending")]
    sort: String,

    /// Engagement window for trending-style sorts (today, week, month,
    /// quarter, all-time)
    #[arg(long, default_value = "all-time")]
    time_frame: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog interactively, one batch at a time
    Browse {
        #[command(flatten)]
        filter: FilterArgs,

        /// Items per batch
        #[arg(long, default_value_t = GRID_PAGE_SIZE)]
        page_size: usize,
    },

    /// Search the catalog by title, developer, or description
    Search {
        /// Search term (case-insensitive substring)
        query: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum number of results to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show full details for one game
    Show {
        /// Game id
        id: String,
    },

    /// Sign in with email and password, or via an OAuth provider
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// OAuth provider (e.g., github, google); prints the authorize URL
        #[arg(long)]
        provider: Option<String>,
    },

    /// Create a new account
    Signup,

    /// Sign out and clear the cached session
    Logout,

    /// Show the signed-in profile
    Whoami,

    /// Submit a game listing from a TOML manifest
    Submit {
        /// Path to the submission manifest
        manifest: PathBuf,

        /// Validate the manifest without uploading anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Manage backend configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the resolved backend settings and their sources
    Show,

    /// Set backend fields in the config file
    Set {
        /// Backend base URL
        #[arg(long)]
        url: Option<String>,

        /// Backend API key
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Print the config file path
    Path,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!(
            "{} {}",
            "error:".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(e.to_string()))?;

    rt.block_on(async {
        match cli.command {
            Commands::Browse { filter, page_size } => {
                commands::browse::run_browse(&filter, page_size).await
            }
            Commands::Search {
                query,
                filter,
                limit,
            } => commands::search::run_search(&query, &filter, limit).await,
            Commands::Show { id } => commands::show::run_show(&id).await,
            Commands::Login { email, provider } => {
                commands::auth::run_login(email, provider).await
            }
            Commands::Signup => commands::auth::run_signup().await,
            Commands::Logout => commands::auth::run_logout().await,
            Commands::Whoami => commands::auth::run_whoami().await,
            Commands::Submit { manifest, dry_run } => {
                commands::submit::run_submit(&manifest, dry_run).await
            }
            Commands::Config { action } => match action {
                ConfigAction::Show => commands::config::run_config_show(),
                ConfigAction::Set { url, api_key } => {
                    commands::config::run_config_set(url.as_deref(), api_key.as_deref())
                }
                ConfigAction::Path => commands::config::run_config_path(),
            },
        }
    })
}
