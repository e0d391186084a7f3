//! The repository data seam the feed and detail view models depend on.

use async_trait::async_trait;

use crate::github::{Readme, Repository, Result, SearchResult};
use crate::query::RepositoryQuery;

/// Source of repository data.
///
/// [`crate::github::GitHubClient`] is the production implementation. Every
/// error is already normalized into a [`crate::github::NetworkError`].
#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// One page of an organization's repositories.
    async fn list_repositories(&self, query: &RepositoryQuery) -> Result<Vec<Repository>>;

    /// One page of search results scoped by `query.search_term`.
    async fn search_repositories(&self, query: &RepositoryQuery) -> Result<SearchResult>;

    async fn fetch_repository(&self, owner: &str, name: &str) -> Result<Repository>;

    /// README metadata, including the raw download URL.
    async fn fetch_readme_metadata(&self, owner: &str, name: &str) -> Result<Readme>;

    /// Raw README text at `download_url`.
    async fn fetch_readme_content(&self, download_url: &str) -> Result<String>;
}
