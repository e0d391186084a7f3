//! GitHub REST access for the repository browser.
//!
//! # Module Structure
//!
//! - [`endpoint`] - Request descriptors (URL, method, headers) per operation
//! - [`decode`] - Status classification and payload decoding
//! - [`error`] - The normalized [`NetworkError`] taxonomy
//! - [`types`] - Wire payloads (`Repository`, `SearchResult`, `Readme`)
//! - [`client`] - [`GitHubClient`], the [`crate::RepositoryService`] implementation
//!
//! ```ignore
//! use repo_viewer::github::{GitHubClient, GITHUB_API_URL};
//! use repo_viewer::{Organization, RepositoryQuery, RepositoryService};
//!
//! let client = GitHubClient::new(GITHUB_API_URL, &token)?;
//! let page = client
//!     .list_repositories(&RepositoryQuery::new(Organization::Algorand, 1, 15))
//!     .await?;
//! ```

mod client;
pub mod decode;
pub mod endpoint;
mod error;
mod types;

pub use client::GitHubClient;
pub use endpoint::{Endpoints, GITHUB_API_URL};
pub use error::{NetworkError, Result};
pub use types::{ErrorEnvelope, License, Owner, Readme, Repository, SearchResult};
