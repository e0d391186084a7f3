use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use super::FavoritesStore;
use super::error::{FavoritesError, Result};
use crate::entity::favorite_repository::{ActiveModel, Column, Entity as FavoriteRepository};
use crate::github::Repository;

/// sea-orm backed [`FavoritesStore`].
pub struct DbFavorites {
    db: DatabaseConnection,
}

impl DbFavorites {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Project a repository onto the favorites row. ID and name are required.
fn to_active_model(repository: &Repository) -> Result<ActiveModel> {
    let id = repository
        .id
        .ok_or(FavoritesError::MissingField { field: "id" })?;
    let name = repository
        .name
        .clone()
        .ok_or(FavoritesError::MissingField { field: "name" })?;

    Ok(ActiveModel {
        id: Set(id),
        name: Set(name),
        owner_login: Set(repository.owner_login().map(str::to_string)),
        owner_avatar_url: Set(repository
            .owner
            .as_ref()
            .and_then(|o| o.avatar_url.clone())),
        description: Set(repository.description.clone()),
        language: Set(repository.language.clone()),
        html_url: Set(repository.html_url.clone()),
        topics: Set(serde_json::json!(
            repository.topics.clone().unwrap_or_default()
        )),
        stargazers_count: Set(repository.stargazers_count),
        watchers_count: Set(repository.watchers_count),
        forks_count: Set(repository.forks_count),
        saved_at: Set(Utc::now().fixed_offset()),
    })
}

/// Re-adding refreshes the projection but keeps the original `saved_at`.
fn upsert_on_conflict() -> OnConflict {
    OnConflict::column(Column::Id)
        .update_columns([
            Column::Name,
            Column::OwnerLogin,
            Column::OwnerAvatarUrl,
            Column::Description,
            Column::Language,
            Column::HtmlUrl,
            Column::Topics,
            Column::StargazersCount,
            Column::WatchersCount,
            Column::ForksCount,
        ])
        .to_owned()
}

#[async_trait]
impl FavoritesStore for DbFavorites {
    async fn is_favorite(&self, id: i64) -> Result<bool> {
        Ok(FavoriteRepository::find_by_id(id)
            .one(&self.db)
            .await?
            .is_some())
    }

    async fn add(&self, repository: &Repository) -> Result<()> {
        let model = to_active_model(repository)?;
        FavoriteRepository::insert(model)
            .on_conflict(upsert_on_conflict())
            .exec(&self.db)
            .await?;
        tracing::debug!(
            id = repository.id,
            name = repository.name.as_deref(),
            "saved favorite"
        );
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<()> {
        let result = FavoriteRepository::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(FavoritesError::NotFound { id });
        }
        tracing::debug!(id, "removed favorite");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Repository>> {
        let models = FavoriteRepository::find()
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Repository::from).collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(FavoriteRepository::find().count(&self.db).await?)
    }
}
