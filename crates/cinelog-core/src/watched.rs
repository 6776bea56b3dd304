use tracing::{debug, warn};

use crate::models::{WatchedMovie, WatchedSummary};
use crate::storage::WatchedStore;

/// The user's watched list.
///
/// The in-memory list is the single source of truth; every mutation writes
/// through to the store synchronously. A failed write is logged and never
/// fails the mutation — persistence is best-effort, the session keeps going.
pub struct WatchedList {
    movies: Vec<WatchedMovie>,
    store: Box<dyn WatchedStore>,
}

impl WatchedList {
    /// Read the list out of the store.
    pub fn load(store: Box<dyn WatchedStore>) -> Self {
        let movies = store.load();
        Self { movies, store }
    }

    /// Add a movie. An id already on the list is replaced, so re-rating a
    /// title updates the existing record instead of duplicating it.
    pub fn add(&mut self, movie: WatchedMovie) {
        if let Some(existing) = self
            .movies
            .iter_mut()
            .find(|m| m.imdb_id == movie.imdb_id)
        {
            debug!(imdb_id = %movie.imdb_id, "replacing existing watched record");
            *existing = movie;
        } else {
            self.movies.push(movie);
        }
        self.persist();
    }

    /// Remove every record with this id.
    pub fn remove(&mut self, imdb_id: &str) {
        self.movies.retain(|m| m.imdb_id != imdb_id);
        self.persist();
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.movies.iter().any(|m| m.imdb_id == imdb_id)
    }

    pub fn get(&self, imdb_id: &str) -> Option<&WatchedMovie> {
        self.movies.iter().find(|m| m.imdb_id == imdb_id)
    }

    /// The rating the user gave a title, if it is on the list. The detail
    /// pane shows this instead of the rating input for already-rated titles.
    pub fn user_rating(&self, imdb_id: &str) -> Option<u8> {
        self.get(imdb_id).map(|m| m.user_rating)
    }

    pub fn movies(&self) -> &[WatchedMovie] {
        &self.movies
    }

    /// Aggregate statistics over the list. All zeros when the list is empty.
    pub fn summary(&self) -> WatchedSummary {
        let count = self.movies.len();
        if count == 0 {
            return WatchedSummary::default();
        }
        let n = count as f32;
        WatchedSummary {
            count,
            avg_imdb_rating: self.movies.iter().map(|m| m.imdb_rating).sum::<f32>() / n,
            avg_user_rating: self
                .movies
                .iter()
                .map(|m| f32::from(m.user_rating))
                .sum::<f32>()
                / n,
            avg_runtime_minutes: self
                .movies
                .iter()
                .map(|m| m.runtime_minutes as f32)
                .sum::<f32>()
                / n,
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.movies) {
            warn!(%err, "failed to persist watched list");
        }
    }
}
