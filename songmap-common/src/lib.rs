//! # songmap common library
//!
//! Shared code for the songmap crates:
//! - Catalog data model (songs, playlists)
//! - Slugification used for tolerant comparisons
//! - Configuration loading
//! - Logging initialisation
//! - Common error type

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod slug;

pub use error::{Error, Result};
pub use model::{Item, Playlist, Song};
