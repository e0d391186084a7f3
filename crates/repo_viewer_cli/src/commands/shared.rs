use std::sync::Arc;

use repo_viewer::{DbFavorites, GitHubClient, NetworkError, connect_and_migrate};

use crate::config::Config;

/// Build the GitHub client from config, requiring a token.
pub(crate) fn github_client(
    config: &Config,
) -> Result<Arc<GitHubClient>, Box<dyn std::error::Error>> {
    let token = config.github_token().ok_or(
        "No GitHub token configured. Set REPO_VIEWER_GITHUB__TOKEN or GITHUB_TOKEN, \
         or add token under [github] in the config file.",
    )?;
    let client = GitHubClient::new(&config.github.api_url, &token)
        .map_err(|e| format!("Invalid GitHub API URL '{}': {e}", config.github.api_url))?;
    Ok(Arc::new(client))
}

/// Open the favorites database, applying pending migrations.
pub(crate) async fn open_favorites(
    database_url: &str,
) -> Result<Arc<DbFavorites>, Box<dyn std::error::Error>> {
    let db = connect_and_migrate(database_url).await?;
    Ok(Arc::new(DbFavorites::new(db)))
}

/// Convert a published network error into the message shown to the user.
pub(crate) fn network_failure(error: Option<&NetworkError>) -> Box<dyn std::error::Error> {
    match error {
        Some(err) => {
            tracing::debug!(error = ?err, "network failure");
            err.user_message().into()
        }
        None => "The request failed.".into(),
    }
}
