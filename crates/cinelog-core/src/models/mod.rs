mod movie;

pub use movie::{WatchedMovie, WatchedSummary};
