//! Repo Viewer CLI - browse GitHub organization repositories from the terminal.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use console::Term;
use repo_viewer::Organization;
use tracing_subscriber::EnvFilter;

use crate::commands::output::OutputFormat;

#[derive(Parser)]
#[command(name = "repo-viewer")]
#[command(version)]
#[command(about = "Browse the repositories of the Algorand GitHub organizations")]
#[command(
    long_about = "Repo Viewer lists and searches the public repositories of the algorand, \
perawallet and algorandfoundation GitHub organizations, shows repository details with \
their README, and keeps a local list of favorite repositories."
)]
#[command(after_long_help = r#"EXAMPLES
    List the first two pages of an organization:
        $ repo-viewer repos algorand --pages 2

    Search an organization:
        $ repo-viewer search perawallet wallet

    Show a repository with its README:
        $ repo-viewer show algorand go-algorand --readme

    Save a favorite:
        $ repo-viewer favorites add algorandfoundation ARCs

CONFIGURATION
    Repo Viewer reads configuration from:
      1. ~/.config/repo-viewer/config.toml (or $XDG_CONFIG_HOME/repo-viewer/config.toml)
      2. ./repo-viewer.toml
      3. Environment variables (REPO_VIEWER_* prefix, nested keys joined with __)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    REPO_VIEWER_DATABASE__URL    Favorites database (default: ~/.local/state/repo-viewer/favorites.db)
    REPO_VIEWER_GITHUB__TOKEN    GitHub personal access token (GITHUB_TOKEN also works)
    REPO_VIEWER_GITHUB__API_URL  GitHub API root (default: https://api.github.com/)
    REPO_VIEWER_FEED__PER_PAGE   Repositories per page (default: 15)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List an organization's repositories
    Repos {
        /// Organization: algorand, perawallet or algorandfoundation
        organization: Organization,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Search an organization's repositories
    Search {
        /// Organization: algorand, perawallet or algorandfoundation
        organization: Organization,

        /// Search term
        term: String,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Show one repository
    Show {
        owner: String,
        name: String,

        /// Also fetch and print the README
        #[arg(short, long)]
        readme: bool,
    },
    /// Manage favorite repositories
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites sorted by name
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Fetch a repository and save it as a favorite
    Add { owner: String, name: String },
    /// Remove a favorite by repository ID
    Remove { id: i64 },
    /// Print the number of favorites
    Count,
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Structured logging only when stdout is not a terminal
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("repo_viewer=info,repo_viewer_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = config::Config::load();
    let cli = Cli::parse();

    match cli.command {
        Commands::Repos {
            organization,
            pages,
            output,
        } => {
            commands::browse::handle_repos(organization, pages, output, &config).await?;
        }
        Commands::Search {
            organization,
            term,
            pages,
            output,
        } => {
            commands::browse::handle_search(organization, term, pages, output, &config).await?;
        }
        Commands::Show {
            owner,
            name,
            readme,
        } => {
            let database_url = prepare_database_url(&config)?;
            commands::show::handle_show(owner, name, readme, &config, &database_url).await?;
        }
        Commands::Favorites { action } => {
            let database_url = prepare_database_url(&config)?;
            commands::favorites::handle_favorites(action, &config, &database_url).await?;
        }
        Commands::Migrate { action } => {
            let database_url = prepare_database_url(&config)?;
            commands::migrate::handle_migrate(action, &database_url).await?;
        }
    }

    Ok(())
}

/// Resolve the database URL and make sure a SQLite file's directory exists.
fn prepare_database_url(config: &config::Config) -> Result<String, Box<dyn std::error::Error>> {
    let database_url = config
        .database_url()
        .ok_or("Could not determine a database location; set REPO_VIEWER_DATABASE__URL")?;

    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g., ?mode=rwc) before path operations
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        let db_path = std::path::Path::new(db_path);

        if db_path.is_relative() && !db_path.as_os_str().is_empty() {
            tracing::warn!(
                "Database path '{}' is relative - behavior depends on current directory.",
                db_path.display()
            );
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(database_url)
}
