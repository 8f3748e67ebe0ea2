//! Playlist container

use super::{Item, Song};
use std::collections::HashMap;
use std::fmt;

/// Ordered collection of songs keyed by song id.
///
/// Re-adding an id is rejected unless the caller explicitly asks for a
/// duplicate, in which case the copy is grouped after the earlier entries of
/// the same id.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    id: String,
    name: String,
    authors: Vec<String>,
    /// Distinct song ids in insertion order, each with its copies
    entries: Vec<(String, Vec<Song>)>,
    /// Song id → position in `entries`
    index: HashMap<String, usize>,
}

impl Playlist {
    pub fn new(id: impl Into<String>, name: impl Into<String>, authors: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            authors,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a song, returning whether it was stored
    pub fn add_song(&mut self, song: Song, duplicate: bool) -> bool {
        match self.index.get(song.id()) {
            None => {
                self.index.insert(song.id().to_string(), self.entries.len());
                self.entries.push((song.id().to_string(), vec![song]));
                true
            }
            Some(&position) if duplicate => {
                self.entries[position].1.push(song);
                true
            }
            Some(_) => false,
        }
    }

    /// Add songs, skipping ids already present
    pub fn add_songs(&mut self, songs: impl IntoIterator<Item = Song>) {
        for song in songs {
            self.add_song(song, false);
        }
    }

    /// Flattened songs: distinct ids in insertion order, copies after their first entry
    pub fn songs(&self) -> Vec<&Song> {
        self.entries
            .iter()
            .flat_map(|(_, copies)| copies.iter())
            .collect()
    }

    /// All copies stored under a song id
    pub fn get(&self, song_id: &str) -> Option<&[Song]> {
        self.index
            .get(song_id)
            .map(|&position| self.entries[position].1.as_slice())
    }

    /// Total number of stored songs, duplicates included
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, copies)| copies.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Item for Playlist {
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

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PLAYLIST - '{}' by {}", self.name, self.authors.join(" & "))
    }
}
