use sea_orm::DbErr;
use thiserror::Error;

/// Errors that can occur in the favorites store.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Database error from sea-orm.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// The repository lacks a field the store keys or sorts on.
    #[error("Repository is missing required field: {field}")]
    MissingField { field: &'static str },

    /// Removal of a repository that was never saved.
    #[error("Favorite not found: id={id}")]
    NotFound { id: i64 },
}

/// Result type alias for favorites operations.
pub type Result<T> = std::result::Result<T, FavoritesError>;
