//! Request intent values: which organization, which page, which search term.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Organizations whose repositories can be browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Organization {
    #[default]
    Algorand,
    PeraWallet,
    AlgorandFoundation,
}

impl Organization {
    /// All organizations, in display order.
    pub const ALL: [Organization; 3] = [
        Organization::Algorand,
        Organization::PeraWallet,
        Organization::AlgorandFoundation,
    ];

    /// GitHub login of the organization.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Organization::Algorand => "algorand",
            Organization::PeraWallet => "perawallet",
            Organization::AlgorandFoundation => "algorandfoundation",
        }
    }

    /// Map a segmented-control index to an organization.
    ///
    /// Out-of-range indices select the last organization.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Organization::Algorand,
            1 => Organization::PeraWallet,
            _ => Organization::AlgorandFoundation,
        }
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown organization '{0}' (expected one of: algorand, perawallet, algorandfoundation)")]
pub struct ParseOrganizationError(pub String);

impl FromStr for Organization {
    type Err = ParseOrganizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Organization::ALL
            .into_iter()
            .find(|org| org.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseOrganizationError(s.to_string()))
    }
}

/// One page request against an organization, optionally filtered by a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryQuery {
    pub organization: Organization,
    pub page: u32,
    pub per_page: u32,
    pub search_term: Option<String>,
}

impl RepositoryQuery {
    /// Build a listing query. Page and page size are clamped to at least 1.
    pub fn new(organization: Organization, page: u32, per_page: u32) -> Self {
        Self {
            organization,
            page: page.max(1),
            per_page: per_page.max(1),
            search_term: None,
        }
    }

    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }
}
