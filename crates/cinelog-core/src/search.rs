//! The search slot: query, request lifecycle, and displayed results.
//!
//! [`SearchState`] is the pure state machine — no clock, no network — and
//! [`SearchSession`] is its async driver: it debounces keystrokes and keeps
//! at most one live catalog request, aborting the previous one whenever it
//! is superseded. A superseded request's response is additionally fenced by
//! a generation token, so it can never be applied even if it was already
//! computed when the abort landed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use cinelog_api::traits::{CatalogService, MovieSummary};

/// Where the search slot currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// Query is empty; nothing to show.
    #[default]
    Idle,
    /// A request is in flight. Previous results stay visible until it
    /// settles (stale-while-revalidate).
    Loading,
    Success,
    Error,
}

/// Identifies one issued request. A response is applied only while its token
/// is still the newest one for the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
    pub query: String,
}

/// Pure search state machine.
#[derive(Debug, Default)]
pub struct SearchState {
    query: String,
    status: SearchStatus,
    results: Vec<MovieSummary>,
    error: Option<String>,
    generation: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a query change. Any in-flight request is superseded. Returns
    /// the token to fetch with, or `None` for an empty query, which clears
    /// to idle without issuing a request.
    pub fn set_query(&mut self, query: &str) -> Option<RequestToken> {
        self.generation += 1;
        self.query = query.to_string();

        if query.is_empty() {
            self.status = SearchStatus::Idle;
            self.results.clear();
            self.error = None;
            return None;
        }

        // Previous results stay on screen while the new request runs.
        self.status = SearchStatus::Loading;
        self.error = None;
        Some(RequestToken {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Apply a settled response. A superseded token is discarded with no
    /// state change at all — stale requests surface neither results nor
    /// errors. Returns whether the response was applied.
    pub fn apply<E: std::fmt::Display>(
        &mut self,
        token: &RequestToken,
        result: Result<Vec<MovieSummary>, E>,
    ) -> bool {
        if token.generation != self.generation {
            debug!(query = %token.query, "discarding superseded search response");
            return false;
        }
        match result {
            Ok(results) => {
                self.results = results;
                self.status = SearchStatus::Success;
                self.error = None;
            }
            Err(err) => {
                // Prior successful results stay visible behind the message.
                self.status = SearchStatus::Error;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Async driver for the search slot.
pub struct SearchSession<C: CatalogService + 'static> {
    client: Arc<C>,
    state: Arc<Mutex<SearchState>>,
    debounce: Duration,
    task: Option<JoinHandle<()>>,
}

impl<C: CatalogService + 'static> SearchSession<C> {
    pub fn new(client: Arc<C>, debounce: Duration) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(SearchState::new())),
            debounce,
            task: None,
        }
    }

    /// Shared handle to the slot state, for rendering.
    pub fn state(&self) -> Arc<Mutex<SearchState>> {
        self.state.clone()
    }

    /// React to a keystroke: supersede the previous request (cancelling a
    /// still-pending debounce with it) and schedule a new one.
    pub async fn set_query(&mut self, query: &str) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let token = self.state.lock().await.set_query(query);
        let Some(token) = token else { return };

        let client = self.client.clone();
        let state = self.state.clone();
        let debounce = self.debounce;
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let result = client.search(&token.query).await;
            state.lock().await.apply(&token, result);
        }));
    }

    /// Wait for the live request, if any, to settle.
    pub async fn settled(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl<C: CatalogService + 'static> Drop for SearchSession<C> {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct FakeError(String);

    /// Scripted catalog: counts calls, sleeps `delay`, then answers with one
    /// summary echoing the query (or fails for the query "boom").
    struct FakeCatalog {
        calls: AtomicU32,
        delay: Duration,
    }

    impl FakeCatalog {
        fn instant() -> Self {
            Self::with_delay(Duration::ZERO)
        }

        fn with_delay(delay: Duration) -> Self {
            Self {
                calls: AtomicU32::new(0),
                delay,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CatalogService for FakeCatalog {
        type Error = FakeError;

        async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, FakeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if query == "boom" {
                return Err(FakeError("catalog down".into()));
            }
            Ok(vec![MovieSummary {
                imdb_id: format!("id-{query}"),
                title: query.to_string(),
                year: "2010".into(),
                poster_url: None,
            }])
        }

        async fn get_detail(
            &self,
            _imdb_id: &str,
        ) -> Result<cinelog_api::traits::MovieDetail, FakeError> {
            unimplemented!("search tests never fetch details")
        }
    }

    // ── Pure state machine ──────────────────────────────────────

    #[test]
    fn test_empty_query_clears_to_idle() {
        let mut state = SearchState::new();
        let token = state.set_query("inception").unwrap();
        state.apply::<FakeError>(&token, Ok(vec![summary("tt1375666", "Inception")]));

        assert!(state.set_query("").is_none());
        assert_eq!(state.status(), SearchStatus::Idle);
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let mut state = SearchState::new();
        let stale = state.set_query("q1").unwrap();
        let live = state.set_query("q2").unwrap();

        assert!(!state.apply::<FakeError>(&stale, Ok(vec![summary("tt1", "Q1")])));
        assert_eq!(state.status(), SearchStatus::Loading);
        assert!(state.results().is_empty());

        assert!(state.apply::<FakeError>(&live, Ok(vec![summary("tt2", "Q2")])));
        assert_eq!(state.status(), SearchStatus::Success);
        assert_eq!(state.results()[0].imdb_id, "tt2");
    }

    #[test]
    fn test_superseded_error_never_surfaces() {
        let mut state = SearchState::new();
        let stale = state.set_query("q1").unwrap();
        let live = state.set_query("q2").unwrap();

        assert!(!state.apply(&stale, Err(FakeError("network down".into()))));
        assert!(state.error().is_none());

        assert!(state.apply::<FakeError>(&live, Ok(vec![])));
        assert_eq!(state.status(), SearchStatus::Success);
    }

    #[test]
    fn test_loading_and_error_keep_previous_results() {
        let mut state = SearchState::new();
        let token = state.set_query("q1").unwrap();
        state.apply::<FakeError>(&token, Ok(vec![summary("tt1", "Q1")]));

        // New query: previous results stay visible while loading.
        let token = state.set_query("q2").unwrap();
        assert_eq!(state.status(), SearchStatus::Loading);
        assert_eq!(state.results().len(), 1);

        // And stay visible behind the error message on failure.
        state.apply(&token, Err(FakeError("network down".into())));
        assert_eq!(state.status(), SearchStatus::Error);
        assert_eq!(state.error(), Some("network down"));
        assert_eq!(state.results()[0].imdb_id, "tt1");
    }

    #[test]
    fn test_empty_results_are_success_not_error() {
        let mut state = SearchState::new();
        let token = state.set_query("zzzz").unwrap();
        state.apply::<FakeError>(&token, Ok(vec![]));
        assert_eq!(state.status(), SearchStatus::Success);
        assert!(state.results().is_empty());
        assert!(state.error().is_none());
    }

    fn summary(id: &str, title: &str) -> MovieSummary {
        MovieSummary {
            imdb_id: id.into(),
            title: title.into(),
            year: "2010".into(),
            poster_url: None,
        }
    }

    // ── Async driver ────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_one_settled_call_per_debounce_window() {
        let client = Arc::new(FakeCatalog::instant());
        let mut session = SearchSession::new(client.clone(), Duration::from_millis(300));

        session.set_query("i").await;
        session.set_query("in").await;
        session.set_query("inception").await;
        session.settled().await;

        assert_eq!(client.calls(), 1);
        let state = session.state();
        let state = state.lock().await;
        assert_eq!(state.status(), SearchStatus::Success);
        assert_eq!(state.results().len(), 1);
        assert_eq!(state.results()[0].title, "inception");
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_request_is_cancelled_by_new_query() {
        let client = Arc::new(FakeCatalog::with_delay(Duration::from_secs(1)));
        let mut session = SearchSession::new(client.clone(), Duration::from_millis(100));

        session.set_query("first").await;
        // Let the debounce fire so "first" is actually in flight.
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(client.calls(), 1);

        session.set_query("second").await;
        session.settled().await;

        assert_eq!(client.calls(), 2);
        let state = session.state();
        let state = state.lock().await;
        assert_eq!(state.results()[0].title, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_issues_no_call() {
        let client = Arc::new(FakeCatalog::instant());
        let mut session = SearchSession::new(client.clone(), Duration::from_millis(100));

        session.set_query("").await;
        session.settled().await;

        assert_eq!(client.calls(), 0);
        let state = session.state();
        assert_eq!(state.lock().await.status(), SearchStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_sets_error() {
        let client = Arc::new(FakeCatalog::instant());
        let mut session = SearchSession::new(client.clone(), Duration::from_millis(100));

        session.set_query("boom").await;
        session.settled().await;

        let state = session.state();
        let state = state.lock().await;
        assert_eq!(state.status(), SearchStatus::Error);
        assert_eq!(state.error(), Some("catalog down"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_query_cancels_pending_request() {
        let client = Arc::new(FakeCatalog::instant());
        let mut session = SearchSession::new(client.clone(), Duration::from_millis(300));

        session.set_query("inception").await;
        // Cleared before the debounce fires: no call at all.
        session.set_query("").await;
        session.settled().await;

        assert_eq!(client.calls(), 0);
        let state = session.state();
        assert_eq!(state.lock().await.status(), SearchStatus::Idle);
    }
}
