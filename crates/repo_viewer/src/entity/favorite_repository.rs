//! FavoriteRepository entity - repositories the user starred locally.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::github::{Owner, Repository};

/// A saved projection of a GitHub repository.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorite_repositories")]
pub struct Model {
    /// GitHub repository ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,

    // ─── Owner ───────────────────────────────────────────────────────────────
    pub owner_login: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub owner_avatar_url: Option<String>,

    // ─── Content ─────────────────────────────────────────────────────────────
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub language: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub html_url: Option<String>,
    /// Topics (stored as JSON array for cross-database compatibility).
    #[sea_orm(column_type = "Json")]
    pub topics: serde_json::Value,

    // ─── Statistics ──────────────────────────────────────────────────────────
    pub stargazers_count: Option<i64>,
    pub watchers_count: Option<i64>,
    pub forks_count: Option<i64>,

    /// When the repository was added to favorites.
    pub saved_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Repository {
    fn from(model: Model) -> Self {
        let topics = serde_json::from_value::<Vec<String>>(model.topics).unwrap_or_default();
        Repository {
            id: Some(model.id),
            name: Some(model.name),
            owner: Some(Owner {
                login: model.owner_login,
                avatar_url: model.owner_avatar_url,
                ..Owner::default()
            }),
            description: model.description,
            language: model.language,
            html_url: model.html_url,
            topics: Some(topics),
            stargazers_count: model.stargazers_count,
            watchers_count: model.watchers_count,
            forks_count: model.forks_count,
            ..Repository::default()
        }
    }
}
