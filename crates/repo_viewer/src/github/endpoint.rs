//! Request descriptors for every GitHub call the viewer makes.

use url::Url;

use super::error::{NetworkError, Result};
use crate::http::HttpRequest;
use crate::query::RepositoryQuery;

/// Public GitHub REST API root.
pub const GITHUB_API_URL: &str = "https://api.github.com/";

const USER_AGENT: &str = "repo-viewer";
const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw";

/// Pure mapping from request intent to a ready-to-send [`HttpRequest`].
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: Url,
    token: String,
}

impl Endpoints {
    /// Create a builder rooted at `base_url`.
    ///
    /// A trailing slash is added when missing so that API paths nest under
    /// the base (`https://ghe.example.com/api/v3` keeps its `/api/v3`).
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized)?;
        if base_url.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl);
        }
        Ok(Self {
            base_url,
            token: token.to_string(),
        })
    }

    /// Builder for the public API.
    pub fn github(token: &str) -> Result<Self> {
        Self::new(GITHUB_API_URL, token)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET orgs/{org}/repos?page=&per_page=`
    pub fn list_repositories(&self, query: &RepositoryQuery) -> Result<HttpRequest> {
        let mut url = self.url_for(&["orgs", query.organization.as_str(), "repos"])?;
        url.query_pairs_mut()
            .append_pair("page", &query.page.to_string())
            .append_pair("per_page", &query.per_page.to_string());
        Ok(self.json_request(url))
    }

    /// `GET search/repositories?q={org}/{term}&page=&per_page=`
    ///
    /// `q` is omitted when the query carries no term.
    pub fn search_repositories(&self, query: &RepositoryQuery) -> Result<HttpRequest> {
        let mut url = self.url_for(&["search", "repositories"])?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(term) = &query.search_term {
                pairs.append_pair("q", &format!("{}/{}", query.organization, term));
            }
            pairs
                .append_pair("page", &query.page.to_string())
                .append_pair("per_page", &query.per_page.to_string());
        }
        Ok(self.json_request(url))
    }

    /// `GET repos/{owner}/{name}`
    pub fn fetch_repository(&self, owner: &str, name: &str) -> Result<HttpRequest> {
        let url = self.url_for(&["repos", owner, name])?;
        Ok(self.json_request(url))
    }

    /// `GET repos/{owner}/{name}/readme`
    pub fn fetch_readme_metadata(&self, owner: &str, name: &str) -> Result<HttpRequest> {
        let url = self.url_for(&["repos", owner, name, "readme"])?;
        Ok(self.json_request(url))
    }

    /// `GET {download_url}`, verbatim.
    pub fn fetch_readme_content(&self, download_url: &str) -> Result<HttpRequest> {
        Url::parse(download_url)?;
        Ok(self.authorized(HttpRequest::get(download_url).with_header("Accept", ACCEPT_RAW)))
    }

    fn url_for(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| NetworkError::InvalidUrl)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn json_request(&self, url: Url) -> HttpRequest {
        self.authorized(HttpRequest::get(url.as_str()).with_header("Accept", ACCEPT_JSON))
    }

    fn authorized(&self, request: HttpRequest) -> HttpRequest {
        request
            .with_header("User-Agent", USER_AGENT)
            .with_header("Authorization", format!("token {}", self.token))
    }
}
