//! GitHub API payload types.
//!
//! Field names mirror the REST API's snake_case wire names. Almost everything
//! is optional: GitHub omits or nulls fields depending on endpoint and token
//! scope, and nothing in the pipeline needs more than a handful of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository resource as returned by list, search and get endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Stable numeric identifier; used for favorites.
    pub id: Option<i64>,
    pub node_id: Option<String>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub private: Option<bool>,
    pub owner: Option<Owner>,
    pub html_url: Option<String>,
    pub description: Option<String>,
    pub fork: Option<bool>,
    pub url: Option<String>,

    // ─── API link templates ─────────────────────────────────────────────────
    pub forks_url: Option<String>,
    pub keys_url: Option<String>,
    pub collaborators_url: Option<String>,
    pub teams_url: Option<String>,
    pub hooks_url: Option<String>,
    pub issue_events_url: Option<String>,
    pub events_url: Option<String>,
    pub assignees_url: Option<String>,
    pub branches_url: Option<String>,
    pub tags_url: Option<String>,
    pub blobs_url: Option<String>,
    pub git_tags_url: Option<String>,
    pub git_refs_url: Option<String>,
    pub trees_url: Option<String>,
    pub statuses_url: Option<String>,
    pub languages_url: Option<String>,
    pub stargazers_url: Option<String>,
    pub contributors_url: Option<String>,
    pub subscribers_url: Option<String>,
    pub subscription_url: Option<String>,
    pub commits_url: Option<String>,
    pub git_commits_url: Option<String>,
    pub comments_url: Option<String>,
    pub issue_comment_url: Option<String>,
    pub contents_url: Option<String>,
    pub compare_url: Option<String>,
    pub merges_url: Option<String>,
    pub archive_url: Option<String>,
    pub downloads_url: Option<String>,
    pub issues_url: Option<String>,
    pub pulls_url: Option<String>,
    pub milestones_url: Option<String>,
    pub notifications_url: Option<String>,
    pub labels_url: Option<String>,
    pub releases_url: Option<String>,
    pub deployments_url: Option<String>,

    // ─── Timestamps ─────────────────────────────────────────────────────────
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,

    // ─── Clone URLs ─────────────────────────────────────────────────────────
    pub git_url: Option<String>,
    pub ssh_url: Option<String>,
    pub clone_url: Option<String>,
    pub svn_url: Option<String>,
    pub homepage: Option<String>,

    // ─── Statistics ─────────────────────────────────────────────────────────
    /// Size in KB.
    pub size: Option<i64>,
    pub stargazers_count: Option<i64>,
    pub watchers_count: Option<i64>,
    pub language: Option<String>,
    pub forks_count: Option<i64>,
    pub open_issues_count: Option<i64>,
    pub forks: Option<i64>,
    pub open_issues: Option<i64>,
    pub watchers: Option<i64>,

    // ─── Features ───────────────────────────────────────────────────────────
    pub has_issues: Option<bool>,
    pub has_projects: Option<bool>,
    pub has_downloads: Option<bool>,
    pub has_wiki: Option<bool>,
    pub has_pages: Option<bool>,
    pub has_discussions: Option<bool>,
    pub mirror_url: Option<String>,
    pub archived: Option<bool>,
    pub disabled: Option<bool>,
    pub license: Option<License>,
    pub allow_forking: Option<bool>,
    pub is_template: Option<bool>,
    pub web_commit_signoff_required: Option<bool>,
    pub topics: Option<Vec<String>>,
    pub visibility: Option<String>,
    pub default_branch: Option<String>,
}

impl Repository {
    /// Login of the owning account, if present.
    pub fn owner_login(&self) -> Option<&str> {
        self.owner.as_ref().and_then(|o| o.login.as_deref())
    }

    /// `owner/name` when both are known, otherwise whatever is available.
    pub fn full_name_or_default(&self) -> String {
        if let Some(full_name) = &self.full_name {
            return full_name.clone();
        }
        match (self.owner_login(), self.name.as_deref()) {
            (Some(owner), Some(name)) => format!("{owner}/{name}"),
            (None, Some(name)) => name.to_string(),
            _ => "<unnamed>".to_string(),
        }
    }
}

/// Account that owns a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: Option<String>,
    pub id: Option<i64>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub key: Option<String>,
    pub name: Option<String>,
    pub spdx_id: Option<String>,
    pub url: Option<String>,
    pub node_id: Option<String>,
}

/// Response of `GET /search/repositories`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_count: Option<i64>,
    pub incomplete_results: Option<bool>,
    pub items: Option<Vec<Repository>>,
}

/// README metadata. The content itself lives behind `download_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readme {
    pub name: Option<String>,
    pub path: Option<String>,
    pub sha: Option<String>,
    pub size: Option<i64>,
    pub html_url: Option<String>,
    pub download_url: Option<String>,
}

/// Body GitHub sends with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}
