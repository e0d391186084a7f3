use repo_viewer::{FavoritesError, FavoritesStore, RepositoryService};

use crate::FavoritesAction;
use crate::commands::output::print_repositories;
use crate::commands::shared::{github_client, open_favorites};
use crate::config::Config;

pub(crate) async fn handle_favorites(
    action: FavoritesAction,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let favorites = open_favorites(database_url).await?;

    match action {
        FavoritesAction::List { output } => {
            let repositories = favorites.list().await?;
            if repositories.is_empty() {
                println!("No favorites yet. Add one with: repo-viewer favorites add <owner> <name>");
            } else {
                print_repositories(&repositories, output)?;
            }
        }
        FavoritesAction::Add { owner, name } => {
            let client = github_client(config)?;
            let repository = client
                .fetch_repository(&owner, &name)
                .await
                .map_err(|e| e.user_message())?;
            favorites.add(&repository).await?;
            println!("Saved {} to favorites.", repository.full_name_or_default());
        }
        FavoritesAction::Remove { id } => match favorites.remove(id).await {
            Ok(()) => println!("Removed favorite {id}."),
            Err(FavoritesError::NotFound { id }) => {
                return Err(format!("No favorite with ID {id}.").into());
            }
            Err(e) => return Err(e.into()),
        },
        FavoritesAction::Count => {
            println!("{}", favorites.count().await?);
        }
    }

    Ok(())
}
