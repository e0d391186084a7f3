//! Initial migration: the favorites table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FavoriteRepositories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FavoriteRepositories::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FavoriteRepositories::Name)
                            .string()
                            .not_null(),
                    )
                    // Owner
                    .col(
                        ColumnDef::new(FavoriteRepositories::OwnerLogin)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteRepositories::OwnerAvatarUrl)
                            .text()
                            .null(),
                    )
                    // Content
                    .col(
                        ColumnDef::new(FavoriteRepositories::Description)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteRepositories::Language)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(FavoriteRepositories::HtmlUrl).text().null())
                    .col(
                        ColumnDef::new(FavoriteRepositories::Topics)
                            .json()
                            .not_null()
                            .default(Expr::cust("'[]'")),
                    )
                    // Statistics
                    .col(
                        ColumnDef::new(FavoriteRepositories::StargazersCount)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteRepositories::WatchersCount)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteRepositories::ForksCount)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FavoriteRepositories::SavedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Favorites are listed by name
        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_repos_name")
                    .table(FavoriteRepositories::Table)
                    .col(FavoriteRepositories::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FavoriteRepositories::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
#[sea_orm(iden = "favorite_repositories")]
enum FavoriteRepositories {
    Table,
    Id,
    Name,
    OwnerLogin,
    OwnerAvatarUrl,
    Description,
    Language,
    HtmlUrl,
    Topics,
    StargazersCount,
    WatchersCount,
    ForksCount,
    SavedAt,
}
