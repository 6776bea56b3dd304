use cinelog_api::traits::MovieDetail;
use serde::{Deserialize, Serialize};

/// A movie the user has watched and rated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedMovie {
    pub imdb_id: String,
    pub title: String,
    pub poster_url: Option<String>,
    pub runtime_minutes: u32,
    pub imdb_rating: f32,
    pub user_rating: u8,
}

impl WatchedMovie {
    /// Build a watched record from a fetched detail plus the user's rating
    /// (clamped to 1-10). Missing runtime or critic rating counts as zero.
    pub fn from_detail(detail: &MovieDetail, user_rating: u8) -> Self {
        Self {
            imdb_id: detail.imdb_id.clone(),
            title: detail.title.clone(),
            poster_url: detail.poster_url.clone(),
            runtime_minutes: detail.runtime_minutes.unwrap_or(0),
            imdb_rating: detail.imdb_rating.unwrap_or(0.0),
            user_rating: user_rating.clamp(1, 10),
        }
    }
}

/// Aggregate statistics over the watched list.
///
/// All fields are zero for an empty list; averages are never NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f32,
    pub avg_user_rating: f32,
    pub avg_runtime_minutes: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(runtime_minutes: Option<u32>, imdb_rating: Option<f32>) -> MovieDetail {
        MovieDetail {
            imdb_id: "tt1375666".into(),
            title: "Inception".into(),
            year: "2010".into(),
            poster_url: None,
            runtime_minutes,
            genre: "Sci-Fi".into(),
            director: "Christopher Nolan".into(),
            actors: "Leonardo DiCaprio".into(),
            plot: "A thief who steals corporate secrets...".into(),
            imdb_rating,
        }
    }

    #[test]
    fn test_from_detail_carries_fields_over() {
        let movie = WatchedMovie::from_detail(&detail(Some(148), Some(8.8)), 9);
        assert_eq!(movie.imdb_id, "tt1375666");
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.runtime_minutes, 148);
        assert_eq!(movie.imdb_rating, 8.8);
        assert_eq!(movie.user_rating, 9);
    }

    #[test]
    fn test_from_detail_clamps_user_rating() {
        let d = detail(Some(148), Some(8.8));
        assert_eq!(WatchedMovie::from_detail(&d, 0).user_rating, 1);
        assert_eq!(WatchedMovie::from_detail(&d, 11).user_rating, 10);
        assert_eq!(WatchedMovie::from_detail(&d, u8::MAX).user_rating, 10);
    }

    #[test]
    fn test_from_detail_missing_fields_count_as_zero() {
        let movie = WatchedMovie::from_detail(&detail(None, None), 7);
        assert_eq!(movie.runtime_minutes, 0);
        assert_eq!(movie.imdb_rating, 0.0);
    }
}
