//! skillmatch - find the users on a roster who hold a requested skill.
//!
//! A roster CSV is loaded once into an immutable [`matching::Catalog`]: an
//! exact skill index plus an optional fitted label classifier used as a
//! fallback tier. Queries go through [`matching::Recommender`] and are
//! projected for display by [`projection`].

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod projection;
pub mod roster;
pub mod server;
pub mod test_utils;

pub use error::{Result, SmError};
