//! Movie catalog clients for cinelog.

pub mod omdb;
pub mod traits;
