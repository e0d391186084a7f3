//! Configuration file support for repo-viewer.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `REPO_VIEWER_`, nested keys joined
//!    with `__`, e.g. `REPO_VIEWER_GITHUB__TOKEN`)
//! 3. Config file (./repo-viewer.toml, then ~/.config/repo-viewer/config.toml)
//! 4. Built-in defaults
//!
//! The favorites database defaults to
//! `sqlite://~/.local/state/repo-viewer/favorites.db` on Linux.
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "sqlite://~/.local/state/repo-viewer/favorites.db"  # optional, this is the default
//!
//! [github]
//! token = "ghp_..."  # or REPO_VIEWER_GITHUB__TOKEN, or GITHUB_TOKEN
//! api_url = "https://api.github.com/"
//!
//! [feed]
//! per_page = 15
//! debounce_ms = 500
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use repo_viewer::FeedOptions;
use repo_viewer::github::GITHUB_API_URL;
use serde::Deserialize;

const APP_NAME: &str = "repo-viewer";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub github: GitHubConfig,
    pub feed: FeedConfig,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL. Defaults to a SQLite file in the state directory.
    pub url: Option<String>,
}

/// GitHub configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    pub token: Option<String>,
    /// API root, for GitHub Enterprise or a local stub.
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: GITHUB_API_URL.to_string(),
        }
    }
}

/// Paging and search tunables.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub per_page: u32,
    /// Search debounce window in milliseconds.
    pub debounce_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let options = FeedOptions::default();
        Self {
            per_page: options.per_page,
            debounce_ms: options.debounce.as_millis() as u64,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/repo-viewer/config.toml)
    /// 3. Local config file (./repo-viewer.toml)
    /// 4. Environment variables with REPO_VIEWER_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("repo-viewer.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./repo-viewer.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // REPO_VIEWER_GITHUB__API_URL -> github.api_url
        builder = builder.add_source(
            Environment::with_prefix("REPO_VIEWER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the database URL, falling back to the default state directory path.
    ///
    /// The default carries `mode=rwc` so SQLite creates the file on first use.
    pub fn database_url(&self) -> Option<String> {
        self.database.url.clone().or_else(|| {
            Self::default_state_dir().map(|state_dir| {
                let db_path = state_dir.join("favorites.db");
                format!("sqlite://{}?mode=rwc", db_path.display())
            })
        })
    }

    /// Get the GitHub token, falling back to the conventional `GITHUB_TOKEN`.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.is_empty())
    }

    pub fn feed_options(&self) -> FeedOptions {
        FeedOptions {
            per_page: self.feed.per_page.max(1),
            debounce: Duration::from_millis(self.feed.debounce_ms),
        }
    }

    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/repo-viewer` or `~/.local/state/repo-viewer`.
    /// On macOS/Windows, falls back to the data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| {
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}
