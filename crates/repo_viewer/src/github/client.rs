//! GitHub API client.

use std::sync::Arc;
#[cfg(feature = "github")]
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::decode::{classify, classify_text};
use super::endpoint::Endpoints;
use super::error::Result;
use super::types::{Readme, Repository, SearchResult};
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::query::RepositoryQuery;
use crate::service::RepositoryService;

#[cfg(feature = "github")]
use crate::http::reqwest_transport::ReqwestTransport;

/// Client for the handful of GitHub endpoints the viewer uses.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    endpoints: Endpoints,
}

impl GitHubClient {
    /// Create a client for `base_url` authenticated with `token`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = GitHubClient::new(repo_viewer::github::GITHUB_API_URL, &token)?;
    /// ```
    #[cfg(feature = "github")]
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(StdDuration::from_secs(30))?;
        let endpoints = Endpoints::new(base_url, token)?;
        Ok(Self::new_with_transport(endpoints, Arc::new(transport)))
    }

    pub fn new_with_transport(endpoints: Endpoints, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "GitHub request");
        let response = self.transport.send(request).await?;
        if response.status != 200 {
            tracing::debug!(status = response.status, "GitHub request failed");
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let response = self.send(request).await?;
        classify(&response)
    }
}

#[async_trait]
impl RepositoryService for GitHubClient {
    async fn list_repositories(&self, query: &RepositoryQuery) -> Result<Vec<Repository>> {
        let request = self.endpoints.list_repositories(query)?;
        self.get_json(request).await
    }

    async fn search_repositories(&self, query: &RepositoryQuery) -> Result<SearchResult> {
        let request = self.endpoints.search_repositories(query)?;
        self.get_json(request).await
    }

    async fn fetch_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let request = self.endpoints.fetch_repository(owner, name)?;
        self.get_json(request).await
    }

    async fn fetch_readme_metadata(&self, owner: &str, name: &str) -> Result<Readme> {
        let request = self.endpoints.fetch_readme_metadata(owner, name)?;
        self.get_json(request).await
    }

    async fn fetch_readme_content(&self, download_url: &str) -> Result<String> {
        let request = self.endpoints.fetch_readme_content(download_url)?;
        let response = self.send(request).await?;
        classify_text(&response)
    }
}
