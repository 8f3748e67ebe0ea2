//! Candidate Classifier
//!
//! Buckets target-catalog candidates relative to a source song:
//!
//! | name similar | shared author | duration close | bucket      |
//! |--------------|---------------|----------------|-------------|
//! | no           | -             | -              | dropped     |
//! | yes          | yes           | yes            | `identical` |
//! | yes          | yes           | no             | `similar`   |
//! | yes          | no            | -              | `others`    |
//!
//! When the source has no duration at all, a small `similar` bucket is also
//! promoted into `identical`.

use songmap_common::config::MatchThresholds;
use songmap_common::slug::slugify;
use songmap_common::{Item, Song};
use std::collections::BTreeSet;

/// Classification of candidates for one source song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarSongs {
    song: Song,
    identical: BTreeSet<Song>,
    similar: BTreeSet<Song>,
    others: BTreeSet<Song>,
    promoted: bool,
}

impl SimilarSongs {
    pub fn new(song: Song) -> Self {
        Self {
            song,
            identical: BTreeSet::new(),
            similar: BTreeSet::new(),
            others: BTreeSet::new(),
            promoted: false,
        }
    }

    /// Source song the candidates were compared against
    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn identical(&self) -> &BTreeSet<Song> {
        &self.identical
    }

    pub fn similar(&self) -> &BTreeSet<Song> {
        &self.similar
    }

    pub fn others(&self) -> &BTreeSet<Song> {
        &self.others
    }

    /// Whether `similar` members were promoted into `identical` because the
    /// source song has no duration
    pub fn promoted(&self) -> bool {
        self.promoted
    }

    /// True when no candidate survived the name gate
    pub fn is_empty(&self) -> bool {
        self.identical.is_empty() && self.similar.is_empty() && self.others.is_empty()
    }
}

/// Comparison form of a song: name as-is, slugified authors
struct ComparisonKey<'a> {
    name: &'a str,
    authors: BTreeSet<String>,
    duration: Option<u32>,
}

impl<'a> ComparisonKey<'a> {
    fn of(song: &'a Song) -> Self {
        Self {
            name: song.name(),
            authors: song.authors().iter().map(|a| slugify(a)).collect(),
            duration: song.duration(),
        }
    }
}

/// Candidate classifier
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    thresholds: MatchThresholds,
}

impl Classifier {
    pub fn new(thresholds: MatchThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    /// Classify candidates against a source song.
    ///
    /// Pure and deterministic. Candidates failing the name gate are dropped,
    /// not placed in `others`.
    pub fn classify(&self, song: &Song, candidates: &[Song]) -> SimilarSongs {
        let mut result = SimilarSongs::new(song.clone());
        let source = ComparisonKey::of(song);

        for candidate in candidates {
            let key = ComparisonKey::of(candidate);
            if !self.similar_names(&source, &key) {
                continue;
            }

            let authors = shared_author(&source, &key);
            let duration = self.close_durations(&source, &key);
            let bucket = match (authors, duration) {
                (true, true) => &mut result.identical,
                (true, false) => &mut result.similar,
                (false, _) => &mut result.others,
            };
            bucket.insert(candidate.clone());
        }

        if song.duration().is_none()
            && result.identical.is_empty()
            && !result.similar.is_empty()
            && result.similar.len() <= self.thresholds.promotion_limit
        {
            result.identical.extend(result.similar.iter().cloned());
            result.promoted = true;
        }

        result
    }

    fn similar_names(&self, left: &ComparisonKey, right: &ComparisonKey) -> bool {
        name_ratio(left.name, right.name) > self.thresholds.name_ratio
    }

    fn close_durations(&self, left: &ComparisonKey, right: &ComparisonKey) -> bool {
        match (left.duration, right.duration) {
            (Some(a), Some(b)) => a.abs_diff(b) < self.thresholds.duration_tolerance_secs,
            _ => false,
        }
    }
}

/// Edit-distance similarity of two names in `[0, 1]`
pub fn name_ratio(left: &str, right: &str) -> f64 {
    strsim::normalized_levenshtein(left, right)
}

/// At least one slugified source author is credited on the candidate
fn shared_author(source: &ComparisonKey, candidate: &ComparisonKey) -> bool {
    !source.authors.is_disjoint(&candidate.authors)
}
