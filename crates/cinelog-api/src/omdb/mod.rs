//! OMDb (Open Movie Database) client.

mod client;
mod error;
mod types;

pub use client::{OmdbClient, DEFAULT_BASE_URL};
pub use error::OmdbError;
