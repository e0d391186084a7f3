//! Paginated, debounced repository feed.
//!
//! [`RepositoryFeed`] turns "browse organization X" and "search X for T"
//! into page requests against a [`crate::RepositoryService`], merges the
//! results and publishes [`FeedSnapshot`]s over a `tokio::sync::watch`
//! channel.
//!
//! - At most one fetch is in flight; overlapping calls return
//!   [`FetchOutcome::Busy`].
//! - Every dispatch and every [`RepositoryFeed::cancel`] bumps a generation
//!   counter shared by all paths; responses tagged with an older generation
//!   are dropped.
//! - [`RepositoryFeed::search`] is debounced and suppresses consecutive
//!   duplicates.

mod orchestrator;
mod state;

pub use orchestrator::{
    DEFAULT_DEBOUNCE, DEFAULT_PER_PAGE, EMPTY_SEARCH_TERM_MESSAGE, FeedOptions, RepositoryFeed,
};
pub use state::{FeedPhase, FeedSnapshot, FetchOutcome};
