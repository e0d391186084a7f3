use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::state::{FeedSnapshot, FetchOutcome};
use crate::github::{NetworkError, Repository, Result};
use crate::query::{Organization, RepositoryQuery};
use crate::service::RepositoryService;

/// Error message recorded when a debounced search settles on an empty term.
pub const EMPTY_SEARCH_TERM_MESSAGE: &str = "searchTerm is not exist";

/// Default number of repositories per page.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Default quiet period before a search fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Tunables for a [`RepositoryFeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    pub per_page: u32,
    pub debounce: Duration,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone)]
enum Source {
    List,
    Search(String),
}

impl Source {
    fn term(&self) -> Option<String> {
        match self {
            Source::List => None,
            Source::Search(term) => Some(term.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Reset,
    Append,
}

/// Debounce bookkeeping, separate from the published snapshot.
#[derive(Default)]
struct SearchGate {
    input_generation: u64,
    last_executed: Option<(Organization, String)>,
}

struct Inner {
    service: Arc<dyn RepositoryService>,
    options: FeedOptions,
    state: watch::Sender<FeedSnapshot>,
    search: Mutex<SearchGate>,
}

/// Fetch orchestrator for one repository list.
///
/// Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct RepositoryFeed {
    inner: Arc<Inner>,
}

impl RepositoryFeed {
    pub fn new(service: Arc<dyn RepositoryService>, options: FeedOptions) -> Self {
        let (state, _) = watch::channel(FeedSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                service,
                options,
                state,
                search: Mutex::new(SearchGate::default()),
            }),
        }
    }

    pub fn options(&self) -> FeedOptions {
        self.inner.options
    }

    /// Read-only subscription to every state transition.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Replace the list with page 1 of `organization`.
    pub async fn load_first_page(&self, organization: Organization) -> FetchOutcome {
        self.run(organization, Source::List, Mode::Reset).await
    }

    /// Append the page after `current_page`.
    pub async fn load_next_page(&self, organization: Organization) -> FetchOutcome {
        self.run(organization, Source::List, Mode::Append).await
    }

    /// Append the next page of search results for `term`.
    pub async fn load_next_search_page(
        &self,
        organization: Organization,
        term: &str,
    ) -> FetchOutcome {
        self.run(organization, Source::Search(term.to_string()), Mode::Append)
            .await
    }

    /// Drop whatever is in flight, including a pending search, and load
    /// page 1 of `organization`.
    pub async fn switch_organization(&self, organization: Organization) -> FetchOutcome {
        self.abandon();
        self.load_first_page(organization).await
    }

    /// Discard the in-flight response and any pending search.
    pub fn cancel(&self) {
        self.abandon();
        tracing::debug!("repository feed cancelled");
    }

    fn abandon(&self) {
        {
            let mut gate = self.gate();
            gate.input_generation += 1;
            gate.last_executed = None;
        }
        self.supersede();
    }

    /// Queue a search for `term` in `organization`.
    ///
    /// The search fires after [`FeedOptions::debounce`] of quiet. A newer
    /// call within that window replaces this one, whose handle then resolves
    /// to [`FetchOutcome::Debounced`]. Must be called within a tokio runtime.
    pub fn search(
        &self,
        organization: Organization,
        term: impl Into<String>,
    ) -> JoinHandle<FetchOutcome> {
        let term = term.into();
        let ticket = {
            let mut gate = self.gate();
            gate.input_generation += 1;
            gate.input_generation
        };

        let feed = self.clone();
        let debounce = self.inner.options.debounce;
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            feed.fire_search(ticket, organization, term).await
        })
    }

    async fn fire_search(
        &self,
        ticket: u64,
        organization: Organization,
        term: String,
    ) -> FetchOutcome {
        let key = (organization, term);
        {
            let gate = self.gate();
            if gate.input_generation != ticket {
                return FetchOutcome::Debounced;
            }
            if gate.last_executed.as_ref() == Some(&key) {
                tracing::debug!(
                    organization = %key.0,
                    term = %key.1,
                    "duplicate search suppressed"
                );
                return FetchOutcome::Duplicate;
            }
        }

        let (organization, term) = key;
        if term.is_empty() {
            self.gate().last_executed = Some((organization, term));
            self.inner.state.send_modify(|s| {
                s.error = Some(NetworkError::other(EMPTY_SEARCH_TERM_MESSAGE));
            });
            return FetchOutcome::Failed;
        }

        let source = Source::Search(term.clone());
        let Some((generation, page)) = self.begin(organization, &source, Mode::Reset) else {
            return FetchOutcome::Busy;
        };
        self.gate().last_executed = Some((organization, term));

        let result = self.fetch(organization, &source, page).await;
        self.finish(organization, generation, page, result)
    }

    async fn run(&self, organization: Organization, source: Source, mode: Mode) -> FetchOutcome {
        let Some((generation, page)) = self.begin(organization, &source, mode) else {
            tracing::debug!(organization = %organization, "fetch already in flight");
            return FetchOutcome::Busy;
        };
        let result = self.fetch(organization, &source, page).await;
        self.finish(organization, generation, page, result)
    }

    /// Claim the loading slot. Returns the dispatch generation and page.
    fn begin(
        &self,
        organization: Organization,
        source: &Source,
        mode: Mode,
    ) -> Option<(u64, u32)> {
        let mut ticket = None;
        self.inner.state.send_if_modified(|s| {
            if s.is_loading {
                return false;
            }
            let page = match mode {
                Mode::Reset => {
                    s.items.clear();
                    s.current_page = 1;
                    1
                }
                Mode::Append => s.current_page.saturating_add(1).max(1),
            };
            s.organization = organization;
            s.active_search_term = source.term();
            s.is_loading = true;
            s.error = None;
            s.started = true;
            s.generation += 1;
            ticket = Some((s.generation, page));
            true
        });

        if let Some((generation, page)) = ticket {
            tracing::debug!(
                organization = %organization,
                term = source.term().as_deref().unwrap_or(""),
                page,
                generation,
                "dispatching repository page"
            );
        }
        ticket
    }

    async fn fetch(
        &self,
        organization: Organization,
        source: &Source,
        page: u32,
    ) -> Result<Vec<Repository>> {
        let query = RepositoryQuery::new(organization, page, self.inner.options.per_page);
        match source {
            Source::List => self.inner.service.list_repositories(&query).await,
            Source::Search(term) => self
                .inner
                .service
                .search_repositories(&query.with_search_term(term.clone()))
                .await
                .map(|result| result.items.unwrap_or_default()),
        }
    }

    /// Merge a settled response unless a newer dispatch has replaced it.
    fn finish(
        &self,
        organization: Organization,
        generation: u64,
        page: u32,
        result: Result<Vec<Repository>>,
    ) -> FetchOutcome {
        let mut outcome = FetchOutcome::Superseded;
        self.inner.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            s.is_loading = false;
            match result {
                Ok(items) => {
                    let count = items.len();
                    s.items.extend(items);
                    s.current_page = page;
                    outcome = FetchOutcome::Loaded { count };
                }
                Err(err) => {
                    s.error = Some(err);
                    outcome = FetchOutcome::Failed;
                }
            }
            true
        });

        match outcome {
            FetchOutcome::Loaded { count } => {
                tracing::debug!(organization = %organization, page, count, "repository page merged");
            }
            FetchOutcome::Superseded => {
                tracing::debug!(
                    organization = %organization,
                    page,
                    generation,
                    "stale response dropped"
                );
            }
            _ => {
                tracing::warn!(organization = %organization, page, "repository fetch failed");
            }
        }
        outcome
    }

    /// Invalidate the current generation and release the loading slot.
    fn supersede(&self) {
        self.inner.state.send_if_modified(|s| {
            s.generation += 1;
            std::mem::replace(&mut s.is_loading, false)
        });
    }

    fn gate(&self) -> MutexGuard<'_, SearchGate> {
        self.inner.search.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::feed::FeedPhase;
    use crate::github::{Endpoints, GitHubClient};
    use crate::http::MockTransport;

    const BASE: &str = "https://api.github.com";

    fn feed_with(transport: &MockTransport) -> RepositoryFeed {
        let endpoints = Endpoints::new(BASE, "test-token").expect("endpoints");
        let client = GitHubClient::new_with_transport(endpoints, Arc::new(transport.clone()));
        RepositoryFeed::new(Arc::new(client), FeedOptions::default())
    }

    fn list_url(org: Organization, page: u32) -> String {
        format!("{BASE}/orgs/{org}/repos?page={page}&per_page=15")
    }

    fn search_url(org: Organization, term: &str, page: u32) -> String {
        format!("{BASE}/search/repositories?q={org}%2F{term}&page={page}&per_page=15")
    }

    fn repo_json(id: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": format!("repo-{id}"),
            "owner": {"login": "algorand"},
            "stargazers_count": id,
        })
    }

    fn page_json(ids: std::ops::Range<i64>) -> serde_json::Value {
        serde_json::Value::Array(ids.map(repo_json).collect())
    }

    fn search_json(ids: std::ops::Range<i64>) -> serde_json::Value {
        serde_json::json!({
            "total_count": 1000,
            "incomplete_results": false,
            "items": page_json(ids),
        })
    }

    fn ids(snapshot: &FeedSnapshot) -> Vec<i64> {
        snapshot.items.iter().filter_map(|r| r.id).collect()
    }

    // ─── Listing ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_first_page_populates_items() {
        let transport = MockTransport::new();
        transport.push_json(list_url(Organization::Algorand, 1), 200, &page_json(0..15));
        let feed = feed_with(&transport);

        let outcome = feed.load_first_page(Organization::Algorand).await;

        assert_eq!(outcome, FetchOutcome::Loaded { count: 15 });
        let snapshot = feed.snapshot();
        assert_eq!(snapshot.items.len(), 15);
        assert!(!snapshot.is_loading);
        assert!(!snapshot.show_empty_state());
        assert_eq!(snapshot.current_page, 1);
        assert_eq!(snapshot.phase(), FeedPhase::Populated);
        assert!(snapshot.active_search_term.is_none());
    }

    #[tokio::test]
    async fn test_empty_first_page_shows_empty_state() {
        let transport = MockTransport::new();
        transport.push_json(list_url(Organization::PeraWallet, 1), 200, &page_json(0..0));
        let feed = feed_with(&transport);

        let outcome = feed.load_first_page(Organization::PeraWallet).await;

        assert_eq!(outcome, FetchOutcome::Loaded { count: 0 });
        let snapshot = feed.snapshot();
        assert!(snapshot.show_empty_state());
        assert_eq!(snapshot.phase(), FeedPhase::Empty);
        assert_eq!(snapshot.organization, Organization::PeraWallet);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_first_page_call_while_loading_is_a_no_op() {
        let transport = MockTransport::new().with_latency(Duration::from_secs(1));
        transport.push_json(list_url(Organization::Algorand, 1), 200, &page_json(0..3));
        let feed = feed_with(&transport);

        let first = {
            let feed = feed.clone();
            tokio::spawn(async move { feed.load_first_page(Organization::Algorand).await })
        };
        feed.subscribe()
            .wait_for(|s| s.is_loading)
            .await
            .expect("feed should start loading");

        assert_eq!(
            feed.load_first_page(Organization::Algorand).await,
            FetchOutcome::Busy
        );
        assert_eq!(
            first.await.expect("first load"),
            FetchOutcome::Loaded { count: 3 }
        );
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(feed.snapshot().items.len(), 3);
    }

    #[tokio::test]
    async fn test_next_page_appends_in_order() {
        let transport = MockTransport::new();
        transport.push_json(list_url(Organization::Algorand, 1), 200, &page_json(0..15));
        transport.push_json(list_url(Organization::Algorand, 2), 200, &page_json(15..20));
        let feed = feed_with(&transport);

        feed.load_first_page(Organization::Algorand).await;
        let outcome = feed.load_next_page(Organization::Algorand).await;

        assert_eq!(outcome, FetchOutcome::Loaded { count: 5 });
        let snapshot = feed.snapshot();
        assert_eq!(ids(&snapshot), (0..20).collect::<Vec<_>>());
        assert_eq!(snapshot.current_page, 2);
    }

    #[tokio::test]
    async fn test_first_page_failure_leaves_items_empty() {
        let transport = MockTransport::new();
        transport.push_json(
            list_url(Organization::AlgorandFoundation, 1),
            404,
            &serde_json::json!({"message": "Not Found"}),
        );
        let feed = feed_with(&transport);

        let outcome = feed.load_first_page(Organization::AlgorandFoundation).await;

        assert_eq!(outcome, FetchOutcome::Failed);
        let snapshot = feed.snapshot();
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.error, Some(NetworkError::NotFound));
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.phase(), FeedPhase::Failed);
    }

    #[tokio::test]
    async fn test_next_page_failure_keeps_previous_items() {
        let transport = MockTransport::new();
        transport.push_json(list_url(Organization::Algorand, 1), 200, &page_json(0..15));
        transport.push_json(
            list_url(Organization::Algorand, 2),
            500,
            &serde_json::json!({"message": "Server Error"}),
        );
        let feed = feed_with(&transport);

        feed.load_first_page(Organization::Algorand).await;
        let outcome = feed.load_next_page(Organization::Algorand).await;

        assert_eq!(outcome, FetchOutcome::Failed);
        let snapshot = feed.snapshot();
        assert_eq!(ids(&snapshot), (0..15).collect::<Vec<_>>());
        assert_eq!(snapshot.error, Some(NetworkError::other("Server Error")));
        assert_eq!(snapshot.current_page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_search_page_failure_keeps_previous_items() {
        let transport = MockTransport::new();
        let org = Organization::PeraWallet;
        transport.push_json(search_url(org, "wallet", 1), 200, &search_json(0..15));
        transport.push_json(
            search_url(org, "wallet", 2),
            403,
            &serde_json::json!({"message": "API rate limit exceeded"}),
        );
        let feed = feed_with(&transport);

        let first = feed.search(org, "wallet").await.expect("search task");
        assert_eq!(first, FetchOutcome::Loaded { count: 15 });
        let outcome = feed.load_next_search_page(org, "wallet").await;

        assert_eq!(outcome, FetchOutcome::Failed);
        let snapshot = feed.snapshot();
        assert_eq!(ids(&snapshot), (0..15).collect::<Vec<_>>());
        assert_eq!(
            snapshot.error,
            Some(NetworkError::other("API rate limit exceeded"))
        );
        assert_eq!(snapshot.current_page, 1);
        assert_eq!(snapshot.active_search_term.as_deref(), Some("wallet"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_search_page_failure_clears_listing() {
        let transport = MockTransport::new();
        let org = Organization::Algorand;
        transport.push_json(list_url(org, 1), 200, &page_json(0..4));
        transport.push_json(
            search_url(org, "sdk", 1),
            422,
            &serde_json::json!({"message": "Validation Failed"}),
        );
        let feed = feed_with(&transport);
        feed.load_first_page(org).await;

        let outcome = feed.search(org, "sdk").await.expect("search task");

        assert_eq!(outcome, FetchOutcome::Failed);
        let snapshot = feed.snapshot();
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.error, Some(NetworkError::other("Validation Failed")));
        assert_eq!(snapshot.active_search_term.as_deref(), Some("sdk"));
        assert_eq!(snapshot.phase(), FeedPhase::Failed);
    }

    #[tokio::test]
    async fn test_failed_next_page_is_retried_at_the_same_page() {
        let transport = MockTransport::new();
        let org = Organization::Algorand;
        transport.push_json(list_url(org, 1), 200, &page_json(0..15));
        transport.push_json(list_url(org, 2), 502, &serde_json::json!({"message": "Bad Gateway"}));
        transport.push_json(list_url(org, 2), 200, &page_json(15..30));
        let feed = feed_with(&transport);

        feed.load_first_page(org).await;
        assert_eq!(feed.load_next_page(org).await, FetchOutcome::Failed);
        assert_eq!(
            feed.load_next_page(org).await,
            FetchOutcome::Loaded { count: 15 }
        );

        let snapshot = feed.snapshot();
        assert_eq!(snapshot.items.len(), 30);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_is_cleared_when_a_new_fetch_dispatches() {
        let transport = MockTransport::new().with_latency(Duration::from_millis(100));
        let org = Organization::Algorand;
        transport.push_json(list_url(org, 1), 404, &serde_json::json!({"message": "Not Found"}));
        transport.push_json(list_url(org, 1), 200, &page_json(0..2));
        let feed = feed_with(&transport);

        feed.load_first_page(org).await;
        assert!(feed.snapshot().error.is_some());

        let reload = {
            let feed = feed.clone();
            tokio::spawn(async move { feed.load_first_page(org).await })
        };
        let loading = feed
            .subscribe()
            .wait_for(|s| s.is_loading)
            .await
            .expect("reload dispatched")
            .clone();
        assert!(loading.error.is_none());

        reload.await.expect("reload");
        assert_eq!(feed.snapshot().items.len(), 2);
    }

    // ─── Search ──────────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_empty_search_term_sets_error_without_request() {
        let transport = MockTransport::new();
        transport.push_json(list_url(Organization::Algorand, 1), 200, &page_json(0..4));
        let feed = feed_with(&transport);
        feed.load_first_page(Organization::Algorand).await;

        let outcome = feed
            .search(Organization::Algorand, "")
            .await
            .expect("search task");

        assert_eq!(outcome, FetchOutcome::Failed);
        let snapshot = feed.snapshot();
        assert_eq!(
            snapshot.error,
            Some(NetworkError::other(EMPTY_SEARCH_TERM_MESSAGE))
        );
        assert_eq!(snapshot.items.len(), 4);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_searches_dispatch_only_the_last_term() {
        let transport = MockTransport::new();
        let org = Organization::Algorand;
        transport.push_json(search_url(org, "sdk", 1), 200, &search_json(0..2));
        let feed = feed_with(&transport);

        let first = feed.search(org, "sd");
        tokio::time::sleep(Duration::from_millis(200)).await;
        let second = feed.search(org, "sdk");

        assert_eq!(first.await.expect("first"), FetchOutcome::Debounced);
        assert_eq!(
            second.await.expect("second"),
            FetchOutcome::Loaded { count: 2 }
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, search_url(org, "sdk", 1));

        let snapshot = feed.snapshot();
        assert_eq!(snapshot.active_search_term.as_deref(), Some("sdk"));
        assert_eq!(snapshot.current_page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_window_restarts_on_each_call() {
        let transport = MockTransport::new();
        let org = Organization::PeraWallet;
        transport.push_json(search_url(org, "wallet", 1), 200, &search_json(0..1));
        let feed = feed_with(&transport);
        let started = tokio::time::Instant::now();

        let _ = feed.search(org, "wal");
        tokio::time::sleep(Duration::from_millis(400)).await;
        let last = feed.search(org, "wallet");

        tokio::time::sleep(Duration::from_millis(450)).await;
        assert!(transport.requests().is_empty());

        last.await.expect("search task");
        assert!(started.elapsed() >= Duration::from_millis(900));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_search_is_suppressed() {
        let transport = MockTransport::new();
        transport.push_json(
            search_url(Organization::Algorand, "sdk", 1),
            200,
            &search_json(0..2),
        );
        transport.push_json(
            search_url(Organization::PeraWallet, "sdk", 1),
            200,
            &search_json(5..6),
        );
        let feed = feed_with(&transport);

        let first = feed.search(Organization::Algorand, "sdk").await.expect("first");
        let again = feed.search(Organization::Algorand, "sdk").await.expect("again");
        let other_org = feed
            .search(Organization::PeraWallet, "sdk")
            .await
            .expect("other org");

        assert_eq!(first, FetchOutcome::Loaded { count: 2 });
        assert_eq!(again, FetchOutcome::Duplicate);
        assert_eq!(other_org, FetchOutcome::Loaded { count: 1 });
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(ids(&feed.snapshot()), vec![5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_replaces_listing_and_pages_by_number() {
        let transport = MockTransport::new();
        let org = Organization::Algorand;
        transport.push_json(list_url(org, 1), 200, &page_json(0..15));
        transport.push_json(search_url(org, "node", 1), 200, &search_json(100..115));
        transport.push_json(search_url(org, "node", 2), 200, &search_json(115..120));
        let feed = feed_with(&transport);

        feed.load_first_page(org).await;
        feed.search(org, "node").await.expect("search");
        assert_eq!(ids(&feed.snapshot()), (100..115).collect::<Vec<_>>());

        let outcome = feed.load_next_search_page(org, "node").await;
        assert_eq!(outcome, FetchOutcome::Loaded { count: 5 });

        let snapshot = feed.snapshot();
        assert_eq!(ids(&snapshot), (100..120).collect::<Vec<_>>());
        assert_eq!(snapshot.current_page, 2);
        assert_eq!(snapshot.active_search_term.as_deref(), Some("node"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_while_loading_is_busy_and_not_remembered() {
        let transport = MockTransport::new().with_latency(Duration::from_secs(2));
        let org = Organization::Algorand;
        transport.push_json(list_url(org, 1), 200, &page_json(0..1));
        transport.push_json(search_url(org, "sdk", 1), 200, &search_json(9..10));
        let feed = feed_with(&transport);

        let listing = {
            let feed = feed.clone();
            tokio::spawn(async move { feed.load_first_page(org).await })
        };
        feed.subscribe()
            .wait_for(|s| s.is_loading)
            .await
            .expect("listing dispatched");

        assert_eq!(feed.search(org, "sdk").await.expect("busy"), FetchOutcome::Busy);
        listing.await.expect("listing");

        assert_eq!(
            feed.search(org, "sdk").await.expect("retry"),
            FetchOutcome::Loaded { count: 1 }
        );
    }

    // ─── Generations ─────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_in_flight_response() {
        let transport = MockTransport::new().with_latency(Duration::from_secs(1));
        transport.push_json(list_url(Organization::Algorand, 1), 200, &page_json(0..5));
        let feed = feed_with(&transport);

        let load = {
            let feed = feed.clone();
            tokio::spawn(async move { feed.load_first_page(Organization::Algorand).await })
        };
        feed.subscribe()
            .wait_for(|s| s.is_loading)
            .await
            .expect("dispatched");

        feed.cancel();
        assert!(!feed.snapshot().is_loading);

        assert_eq!(load.await.expect("load"), FetchOutcome::Superseded);
        let snapshot = feed.snapshot();
        assert!(snapshot.items.is_empty());
        assert!(snapshot.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_search() {
        let transport = MockTransport::new();
        let feed = feed_with(&transport);

        let pending = feed.search(Organization::Algorand, "sdk");
        feed.cancel();

        assert_eq!(pending.await.expect("search task"), FetchOutcome::Debounced);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_organization_drops_pending_search() {
        let transport = MockTransport::new();
        transport.push_json(
            search_url(Organization::Algorand, "sdk", 1),
            200,
            &search_json(9..10),
        );
        transport.push_json(
            list_url(Organization::PeraWallet, 1),
            200,
            &page_json(50..52),
        );
        let feed = feed_with(&transport);

        let pending = feed.search(Organization::Algorand, "sdk");
        let switched = feed.switch_organization(Organization::PeraWallet).await;

        assert_eq!(switched, FetchOutcome::Loaded { count: 2 });
        assert_eq!(pending.await.expect("search task"), FetchOutcome::Debounced);
        let snapshot = feed.snapshot();
        assert_eq!(ids(&snapshot), vec![50, 51]);
        assert_eq!(snapshot.organization, Organization::PeraWallet);
        assert!(snapshot.active_search_term.is_none());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_search_error_survives_in_flight_listing() {
        let transport = MockTransport::new().with_latency(Duration::from_secs(2));
        let org = Organization::Algorand;
        transport.push_json(list_url(org, 1), 200, &page_json(0..3));
        let feed = feed_with(&transport);

        let listing = {
            let feed = feed.clone();
            tokio::spawn(async move { feed.load_first_page(org).await })
        };
        feed.subscribe()
            .wait_for(|s| s.is_loading)
            .await
            .expect("dispatched");

        let empty = feed.search(org, "").await.expect("search task");
        assert_eq!(empty, FetchOutcome::Failed);
        assert!(feed.snapshot().is_loading);

        assert_eq!(
            listing.await.expect("listing"),
            FetchOutcome::Loaded { count: 3 }
        );
        let snapshot = feed.snapshot();
        assert_eq!(snapshot.items.len(), 3);
        assert_eq!(
            snapshot.error,
            Some(NetworkError::other(EMPTY_SEARCH_TERM_MESSAGE))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_organization_wins_over_stale_response() {
        let transport = MockTransport::new().with_latency(Duration::from_secs(1));
        transport.push_json(list_url(Organization::Algorand, 1), 200, &page_json(0..5));
        transport.push_json(list_url(Organization::PeraWallet, 1), 200, &page_json(50..52));
        let feed = feed_with(&transport);

        let stale = {
            let feed = feed.clone();
            tokio::spawn(async move { feed.load_first_page(Organization::Algorand).await })
        };
        feed.subscribe()
            .wait_for(|s| s.is_loading)
            .await
            .expect("dispatched");

        let fresh = feed.switch_organization(Organization::PeraWallet).await;

        assert_eq!(stale.await.expect("stale"), FetchOutcome::Superseded);
        assert_eq!(fresh, FetchOutcome::Loaded { count: 2 });
        let snapshot = feed.snapshot();
        assert_eq!(ids(&snapshot), vec![50, 51]);
        assert_eq!(snapshot.organization, Organization::PeraWallet);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_generation_advances_on_every_dispatch() {
        let transport = MockTransport::new();
        let org = Organization::Algorand;
        transport.push_json(list_url(org, 1), 200, &page_json(0..1));
        transport.push_json(list_url(org, 2), 200, &page_json(1..2));
        let feed = feed_with(&transport);

        let before = feed.snapshot().generation();
        feed.load_first_page(org).await;
        feed.load_next_page(org).await;
        assert_eq!(feed.snapshot().generation(), before + 2);
    }
}
