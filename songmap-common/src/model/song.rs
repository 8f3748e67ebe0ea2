//! Song value type

use super::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single track as reported by a catalog.
///
/// Equality, hashing and ordering cover every field (id, name, authors,
/// duration, album). Two candidates with the same content collapse when
/// stored in a set, whatever catalog call produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Song {
    id: String,
    name: String,
    authors: Vec<String>,
    /// Length in whole seconds
    duration: Option<u32>,
    album: Option<String>,
}

impl Song {
    /// Create a song without duration or album
    pub fn new(id: impl Into<String>, name: impl Into<String>, authors: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            authors,
            duration: None,
            album: None,
        }
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    pub fn set_duration(&mut self, seconds: u32) {
        self.duration = Some(seconds);
    }

    pub fn set_album(&mut self, album: impl Into<String>) {
        self.album = Some(album.into());
    }

    /// Copy of this song with a different name (other fields kept)
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Copy of this song with a different author list (other fields kept)
    pub fn with_authors(&self, authors: Vec<String>) -> Self {
        Self {
            authors,
            ..self.clone()
        }
    }

    /// Duration as `mm:ss`, if known
    pub fn format_duration(&self) -> Option<String> {
        self.duration
            .map(|secs| format!("{:02}:{:02}", secs / 60, secs % 60))
    }
}

impl Item for Song {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn authors(&self) -> &[String] {
        &self.authors
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SONG - '{}' by {}", self.name, self.authors.join(", "))?;
        if let Some(duration) = self.format_duration() {
            write!(f, " ({})", duration)?;
        }
        Ok(())
    }
}
