//! The selection slot: which title is open for detail view, and the fetch
//! that backs it. Same request discipline as the search slot — selecting a
//! new title aborts the previous detail fetch, and a generation token fences
//! out any response that was already computed.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use cinelog_api::traits::{CatalogService, MovieDetail};

/// Detail pane state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailStatus {
    /// No selection; the result list is showing.
    #[default]
    Closed,
    Loading,
    Ready(MovieDetail),
    Error(String),
}

/// Identifies one issued detail fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailToken {
    generation: u64,
    pub imdb_id: String,
}

/// Pure selection state machine.
#[derive(Debug, Default)]
pub struct SelectionState {
    selected_id: Option<String>,
    status: DetailStatus,
    generation: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a title. Any in-flight detail fetch is superseded.
    pub fn select(&mut self, imdb_id: &str) -> DetailToken {
        self.generation += 1;
        self.selected_id = Some(imdb_id.to_string());
        self.status = DetailStatus::Loading;
        DetailToken {
            generation: self.generation,
            imdb_id: imdb_id.to_string(),
        }
    }

    /// Back to the list view. Any in-flight fetch is superseded.
    pub fn close(&mut self) {
        self.generation += 1;
        self.selected_id = None;
        self.status = DetailStatus::Closed;
    }

    /// Apply a settled detail response; discarded when superseded.
    pub fn apply<E: std::fmt::Display>(
        &mut self,
        token: &DetailToken,
        result: Result<MovieDetail, E>,
    ) -> bool {
        if token.generation != self.generation {
            debug!(imdb_id = %token.imdb_id, "discarding superseded detail response");
            return false;
        }
        self.status = match result {
            Ok(detail) => DetailStatus::Ready(detail),
            Err(err) => DetailStatus::Error(err.to_string()),
        };
        true
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn status(&self) -> &DetailStatus {
        &self.status
    }
}

/// Async driver for the selection slot.
pub struct DetailSession<C: CatalogService + 'static> {
    client: Arc<C>,
    state: Arc<Mutex<SelectionState>>,
    task: Option<JoinHandle<()>>,
}

impl<C: CatalogService + 'static> DetailSession<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(SelectionState::new())),
            task: None,
        }
    }

    /// Shared handle to the slot state, for rendering.
    pub fn state(&self) -> Arc<Mutex<SelectionState>> {
        self.state.clone()
    }

    /// Open a title and fetch its detail, aborting any stale fetch first.
    pub async fn select(&mut self, imdb_id: &str) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let token = self.state.lock().await.select(imdb_id);

        let client = self.client.clone();
        let state = self.state.clone();
        self.task = Some(tokio::spawn(async move {
            let result = client.get_detail(&token.imdb_id).await;
            state.lock().await.apply(&token, result);
        }));
    }

    /// Close the detail view, aborting any in-flight fetch.
    pub async fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.state.lock().await.close();
    }

    /// Wait for the live fetch, if any, to settle.
    pub async fn settled(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl<C: CatalogService + 'static> Drop for DetailSession<C> {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}
