use console::style;
use repo_viewer::{FetchOutcome, Organization, RepositoryFeed};

use crate::commands::output::{OutputFormat, print_repositories};
use crate::commands::shared::{github_client, network_failure};
use crate::config::Config;

/// Whether another page is worth requesting after `outcome`.
///
/// A short page means the listing is exhausted.
fn has_more(outcome: FetchOutcome, per_page: u32) -> bool {
    matches!(outcome, FetchOutcome::Loaded { count } if count >= per_page as usize)
}

pub(crate) async fn handle_repos(
    organization: Organization,
    pages: u32,
    output: OutputFormat,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let feed = RepositoryFeed::new(github_client(config)?, config.feed_options());
    let per_page = feed.options().per_page;

    let mut outcome = feed.load_first_page(organization).await;
    for _ in 1..pages.max(1) {
        if !has_more(outcome, per_page) {
            break;
        }
        outcome = feed.load_next_page(organization).await;
    }

    report(&feed, outcome, output)
}

pub(crate) async fn handle_search(
    organization: Organization,
    term: String,
    pages: u32,
    output: OutputFormat,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let feed = RepositoryFeed::new(github_client(config)?, config.feed_options());
    let per_page = feed.options().per_page;

    let mut outcome = feed.search(organization, term.clone()).await?;
    for _ in 1..pages.max(1) {
        if !has_more(outcome, per_page) {
            break;
        }
        outcome = feed.load_next_search_page(organization, &term).await;
    }

    report(&feed, outcome, output)
}

/// Print whatever the feed accumulated. A failure with nothing to show is an error;
/// a failure after earlier pages is a warning.
fn report(
    feed: &RepositoryFeed,
    outcome: FetchOutcome,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = feed.snapshot();

    if outcome == FetchOutcome::Failed {
        if snapshot.items.is_empty() {
            return Err(network_failure(snapshot.error.as_ref()));
        }
        if let Some(err) = &snapshot.error {
            eprintln!("{} {}", style("warning:").yellow().bold(), err.user_message());
        }
    }

    if snapshot.show_empty_state() {
        println!("No repositories found in {}.", snapshot.organization);
        return Ok(());
    }

    print_repositories(&snapshot.items, output)?;
    tracing::info!(
        organization = %snapshot.organization,
        pages = snapshot.current_page,
        count = snapshot.items.len(),
        "listed repositories"
    );
    Ok(())
}
