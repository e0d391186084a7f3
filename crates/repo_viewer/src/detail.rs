//! View model for a single repository.
//!
//! [`RepositoryDetail`] runs the two-step README flow (metadata, then the raw
//! content behind `download_url`) and mirrors the favorite flag for one
//! repository. State is published as a [`DetailSnapshot`] over a watch channel.

use std::sync::Arc;

use tokio::sync::watch;

use crate::favorites::{self, FavoritesStore};
use crate::github::{NetworkError, Repository, Result};
use crate::service::RepositoryService;

/// Point-in-time view of a [`RepositoryDetail`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailSnapshot {
    pub repository: Repository,
    /// Raw README text once loaded.
    pub readme: Option<String>,
    /// True across both README steps, or while refreshing the record.
    pub is_loading: bool,
    pub error: Option<NetworkError>,
    pub is_favorite: bool,
}

/// Detail view model for one repository.
pub struct RepositoryDetail {
    service: Arc<dyn RepositoryService>,
    favorites: Arc<dyn FavoritesStore>,
    state: watch::Sender<DetailSnapshot>,
}

impl RepositoryDetail {
    pub fn new(
        repository: Repository,
        service: Arc<dyn RepositoryService>,
        favorites: Arc<dyn FavoritesStore>,
    ) -> Self {
        let (state, _) = watch::channel(DetailSnapshot {
            repository,
            ..DetailSnapshot::default()
        });
        Self {
            service,
            favorites,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        self.state.borrow().clone()
    }

    fn coordinates(&self) -> Option<(String, String)> {
        let state = self.state.borrow();
        let owner = state.repository.owner_login()?.to_string();
        let name = state.repository.name.clone()?;
        Some((owner, name))
    }

    /// Fetch the README pointer, then its content.
    ///
    /// # Errors
    /// `InvalidUrl` when the repository has no owner or name, `NoData` when
    /// the metadata carries no `download_url`, otherwise whatever the service
    /// reports. The error is also published in the snapshot.
    pub async fn load_readme(&self) -> Result<String> {
        self.start();
        let result = self.fetch_readme().await;
        self.state.send_modify(|s| {
            s.is_loading = false;
            match &result {
                Ok(text) => {
                    s.readme = Some(text.clone());
                    s.error = None;
                }
                Err(err) => s.error = Some(err.clone()),
            }
        });
        if let Err(err) = &result {
            tracing::warn!(error = %err, "README load failed");
        }
        result
    }

    async fn fetch_readme(&self) -> Result<String> {
        let (owner, name) = self.coordinates().ok_or(NetworkError::InvalidUrl)?;
        let metadata = self.service.fetch_readme_metadata(&owner, &name).await?;
        let download_url = metadata.download_url.ok_or(NetworkError::NoData)?;
        tracing::debug!(%owner, %name, url = %download_url, "fetching README content");
        self.service.fetch_readme_content(&download_url).await
    }

    /// Re-fetch the repository record and replace the held copy.
    ///
    /// # Errors
    /// `InvalidUrl` when the repository has no owner or name, otherwise the
    /// service error.
    pub async fn refresh(&self) -> Result<()> {
        self.start();
        let result = match self.coordinates() {
            Some((owner, name)) => self.service.fetch_repository(&owner, &name).await,
            None => Err(NetworkError::InvalidUrl),
        };
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        self.state.send_modify(|s| {
            s.is_loading = false;
            match result {
                Ok(repository) => {
                    s.repository = repository;
                    s.error = None;
                }
                Err(err) => s.error = Some(err),
            }
        });
        outcome
    }

    /// Re-read the favorite flag from the store.
    ///
    /// # Errors
    /// Store failures are returned; the published flag is left unchanged.
    pub async fn refresh_favorite(&self) -> favorites::Result<bool> {
        let id = self.state.borrow().repository.id;
        let Some(id) = id else {
            self.state.send_if_modified(|s| std::mem::replace(&mut s.is_favorite, false));
            return Ok(false);
        };
        let is_favorite = self.favorites.is_favorite(id).await?;
        self.state
            .send_if_modified(|s| std::mem::replace(&mut s.is_favorite, is_favorite) != is_favorite);
        Ok(is_favorite)
    }

    /// Add or remove the repository from favorites and return the new flag.
    ///
    /// # Errors
    /// Store failures are returned; the published flag is left unchanged.
    pub async fn toggle_favorite(&self) -> favorites::Result<bool> {
        let (repository, currently) = {
            let state = self.state.borrow();
            (state.repository.clone(), state.is_favorite)
        };

        if currently {
            let id = repository
                .id
                .ok_or(favorites::FavoritesError::MissingField { field: "id" })?;
            self.favorites.remove(id).await?;
        } else {
            self.favorites.add(&repository).await?;
        }

        let is_favorite = !currently;
        self.state.send_modify(|s| s.is_favorite = is_favorite);
        tracing::debug!(
            id = repository.id,
            name = repository.name.as_deref(),
            is_favorite,
            "favorite toggled"
        );
        Ok(is_favorite)
    }

    fn start(&self) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
    }
}
