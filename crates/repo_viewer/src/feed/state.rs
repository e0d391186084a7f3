//! Observable feed state.

use crate::github::{NetworkError, Repository};
use crate::query::Organization;

/// Point-in-time view of a [`super::RepositoryFeed`].
///
/// Only the feed writes these; consumers receive clones or watch borrows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSnapshot {
    /// Accumulated results, in page order.
    pub items: Vec<Repository>,
    /// True from dispatch until the request settles.
    pub is_loading: bool,
    /// Latest failure. Cleared when a new fetch is dispatched.
    pub error: Option<NetworkError>,
    /// Last page requested by a reset, or last page appended.
    pub current_page: u32,
    pub organization: Organization,
    /// Term the items were searched with, `None` for plain listings.
    pub active_search_term: Option<String>,
    pub(crate) generation: u64,
    pub(crate) started: bool,
}

impl FeedSnapshot {
    /// Whether the UI should show its "nothing here" placeholder.
    #[must_use]
    pub fn show_empty_state(&self) -> bool {
        !self.is_loading && self.items.is_empty()
    }

    #[must_use]
    pub fn phase(&self) -> FeedPhase {
        if self.is_loading {
            FeedPhase::Loading
        } else if self.error.is_some() {
            FeedPhase::Failed
        } else if !self.started {
            FeedPhase::Idle
        } else if self.items.is_empty() {
            FeedPhase::Empty
        } else {
            FeedPhase::Populated
        }
    }

    /// Tag of the most recent dispatch or cancellation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Coarse state machine derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    Idle,
    Loading,
    Populated,
    Empty,
    Failed,
}

/// What happened to a single feed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page arrived and was merged.
    Loaded { count: usize },
    /// The request failed; the error is in the snapshot.
    Failed,
    /// Another fetch was in flight, so nothing was dispatched.
    Busy,
    /// A newer dispatch or a cancel made this response stale; it was dropped.
    Superseded,
    /// A later `search` call replaced this one inside the debounce window.
    Debounced,
    /// Same organization and term as the previous executed search.
    Duplicate,
}
