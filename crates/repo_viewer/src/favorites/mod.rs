//! Locally persisted favorite repositories.
//!
//! [`FavoritesStore`] is the seam the detail view model and the CLI use;
//! [`DbFavorites`] implements it on top of sea-orm.

mod db;
mod error;

use async_trait::async_trait;

use crate::github::Repository;

pub use db::DbFavorites;
pub use error::{FavoritesError, Result};

/// Add/remove/list/check-existence of favorite repositories by ID.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn is_favorite(&self, id: i64) -> Result<bool>;

    /// Save `repository`, replacing any earlier copy with the same ID.
    async fn add(&self, repository: &Repository) -> Result<()>;

    async fn remove(&self, id: i64) -> Result<()>;

    /// All favorites, sorted by name ascending.
    async fn list(&self) -> Result<Vec<Repository>>;

    /// Number of favorites (tab badge).
    async fn count(&self) -> Result<u64>;
}
