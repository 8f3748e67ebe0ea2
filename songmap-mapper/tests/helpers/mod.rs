//! Test Helper Utilities
//!
//! Shared utilities for testing songmap-mapper

#![allow(dead_code)]

pub mod log_capture;
pub mod stub_catalog;

pub use log_capture::LogCapture;
pub use stub_catalog::StubCatalog;

use songmap_common::Song;

/// Song with authors given as string slices
pub fn song(id: &str, name: &str, authors: &[&str], duration: Option<u32>) -> Song {
    let song = Song::new(id, name, authors.iter().map(|a| a.to_string()).collect());
    match duration {
        Some(seconds) => song.with_duration(seconds),
        None => song,
    }
}
