//! Repo Viewer - browse the repositories of a few GitHub organizations.
//!
//! The library holds everything below the presentation layer: the
//! [`RepositoryFeed`] fetch orchestrator (pagination, debounced search,
//! cancellation), GitHub endpoint building and response classification, the
//! [`RepositoryDetail`] view model and a sea-orm backed favorites store.
//!
//! # Features
//!
//! - `github` - Enables the reqwest transport and [`GitHubClient::new`].
//! - `sqlite` - Enables the SQLite driver for the favorites database.
//! - `migrate` - Enables database migration support. When enabled, you can use
//!   [`connect_and_migrate`] to automatically run migrations on connection.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use repo_viewer::{FeedOptions, GitHubClient, Organization, RepositoryFeed};
//!
//! let client = GitHubClient::new(repo_viewer::github::GITHUB_API_URL, &token)?;
//! let feed = RepositoryFeed::new(Arc::new(client), FeedOptions::default());
//!
//! feed.load_first_page(Organization::Algorand).await;
//! feed.load_next_page(Organization::Algorand).await;
//! println!("{} repositories", feed.snapshot().items.len());
//! ```

pub mod db;
pub mod detail;
pub mod entity;
pub mod favorites;
pub mod feed;
pub mod github;
pub mod http;
pub mod query;
pub mod service;

#[cfg(feature = "migrate")]
pub mod migration;

pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use detail::{DetailSnapshot, RepositoryDetail};
pub use entity::prelude::*;
pub use favorites::{DbFavorites, FavoritesError, FavoritesStore};
pub use feed::{FeedOptions, FeedPhase, FeedSnapshot, FetchOutcome, RepositoryFeed};
pub use github::{GitHubClient, NetworkError, Readme, Repository, SearchResult};
pub use http::{HttpError, HttpRequest, HttpResponse, HttpTransport};
pub use query::{Organization, ParseOrganizationError, RepositoryQuery};
pub use service::RepositoryService;
