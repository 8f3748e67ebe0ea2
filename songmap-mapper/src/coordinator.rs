//! Reconciliation Coordinator
//!
//! Runs the search-then-classify loop for one source song:
//! 1. Expand the source song (clean name, extra credits)
//! 2. For each name variant, search by name alone and by name + each author
//! 3. Reclassify the whole accumulated candidate pool after every variant
//! 4. Stop at the first variant that yields an identical match
//!
//! A failing search is logged and counts as zero results. It never aborts the
//! song.

use crate::catalog::{Catalog, SearchQuery};
use crate::classifier::{Classifier, SimilarSongs};
use crate::error::{MapError, MapResult};
use crate::expander::{expand_song, name_variants};
use songmap_common::config::MapperConfig;
use songmap_common::{Item, Song};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Terminal state of one song's reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// At least one identical candidate; `best` is the chosen one
    Found { best: Song, identical: usize },
    /// No identical candidate, fall back to every similar one
    Similar { candidates: Vec<Song> },
    /// Nothing usable; up to `max_display` unrelated near misses kept for diagnostics
    Lost { near_misses: Vec<Song>, others: usize },
}

/// Result of reconciling one source song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongMapping {
    /// Source catalog id
    pub source_id: String,
    /// Chosen target catalog ids (empty when lost)
    pub target_ids: Vec<String>,
    pub outcome: MatchOutcome,
}

impl SongMapping {
    fn from_outcome(source_id: &str, outcome: MatchOutcome) -> Self {
        let target_ids = match &outcome {
            MatchOutcome::Found { best, .. } => vec![best.id().to_string()],
            MatchOutcome::Similar { candidates } => {
                candidates.iter().map(|s| s.id().to_string()).collect()
            }
            MatchOutcome::Lost { .. } => Vec::new(),
        };
        Self {
            source_id: source_id.to_string(),
            target_ids,
            outcome,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.target_ids.is_empty()
    }
}

/// Per-song reconciliation against one target catalog
#[derive(Clone)]
pub struct SongMapper {
    catalog: Arc<dyn Catalog>,
    classifier: Classifier,
    /// Candidates listed per song in diagnostics
    max_display: usize,
}

impl SongMapper {
    /// Create a mapper with default thresholds
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self::from_config(catalog, &MapperConfig::default())
    }

    pub fn from_config(catalog: Arc<dyn Catalog>, config: &MapperConfig) -> Self {
        Self {
            catalog,
            classifier: Classifier::new(config.thresholds.clone()),
            max_display: config.max_display,
        }
    }

    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Reconcile one song and log the outcome.
    ///
    /// `index` is the 1-based position of the song in its batch, used only in logs.
    ///
    /// # Errors
    /// Returns `MapError::InvalidSong` for a song without id or name. Catalog
    /// failures are absorbed.
    pub async fn map_song(&self, song: &Song, index: usize) -> MapResult<SongMapping> {
        let result = self.find_candidates(song, index).await?;
        let outcome = self.select(&result);
        self.log_outcome(index, result.song(), &outcome);
        Ok(SongMapping::from_outcome(song.id(), outcome))
    }

    /// Search and classify without selecting a match
    pub async fn find_candidates(&self, song: &Song, index: usize) -> MapResult<SimilarSongs> {
        validate(song)?;

        let source = expand_song(song);
        let variants = name_variants(source.name());

        let mut pool: BTreeSet<Song> = BTreeSet::new();
        let mut result = SimilarSongs::new(source.clone());

        for (attempt, variant) in variants.iter().enumerate() {
            debug!(
                index,
                catalog = self.catalog.name(),
                variant = %variant,
                attempt = attempt + 1,
                of = variants.len(),
                "Searching name variant"
            );

            for query in queries_for(variant, source.authors()) {
                match self.catalog.search_by_attributes(&query).await {
                    Ok(found) => pool.extend(found.iter().map(expand_song)),
                    Err(e) => {
                        error!(
                            index,
                            catalog = self.catalog.name(),
                            variant = %query.name,
                            author = ?query.author,
                            error = %e,
                            "{}: Failed {}: {}",
                            index,
                            source,
                            e
                        );
                    }
                }
            }

            let candidates: Vec<Song> = pool.iter().cloned().collect();
            result = self.classifier.classify(&source, &candidates);

            if !result.identical().is_empty() {
                debug!(
                    index,
                    variant = %variant,
                    skipped = variants.len() - attempt - 1,
                    "Identical match found, skipping remaining variants"
                );
                break;
            }
        }

        Ok(result)
    }

    /// Selection policy: identical, then similar, then lost
    pub fn select(&self, result: &SimilarSongs) -> MatchOutcome {
        if let Some(best) = result.identical().iter().next() {
            return MatchOutcome::Found {
                best: best.clone(),
                identical: result.identical().len(),
            };
        }

        if !result.similar().is_empty() {
            return MatchOutcome::Similar {
                candidates: result.similar().iter().cloned().collect(),
            };
        }

        MatchOutcome::Lost {
            near_misses: result.others().iter().take(self.max_display).cloned().collect(),
            others: result.others().len(),
        }
    }

    fn log_outcome(&self, index: usize, source: &Song, outcome: &MatchOutcome) {
        match outcome {
            MatchOutcome::Found { best, identical } => {
                if *identical > 1 {
                    info!(index, identical, "{}: Found {} (out of {})", index, source, identical);
                } else {
                    info!(index, identical, "{}: Found {}", index, source);
                }
                info!(index, "{}:   - {}", index, best);
            }
            MatchOutcome::Similar { candidates } => {
                warn!(
                    index,
                    similar = candidates.len(),
                    "{}: Found {} ({} similar)",
                    index,
                    source,
                    candidates.len()
                );
                for candidate in candidates.iter().take(self.max_display) {
                    warn!(index, "{}:   - {}", index, candidate);
                }
            }
            MatchOutcome::Lost { near_misses, others } if *others > 0 => {
                error!(index, others, "{}: Lost {} ({} other)", index, source, others);
                for candidate in near_misses {
                    error!(index, "{}:   - {}", index, candidate);
                }
            }
            MatchOutcome::Lost { .. } => {
                error!(index, "{}: Lost {}", index, source);
            }
        }
    }
}

fn validate(song: &Song) -> MapResult<()> {
    if song.id().trim().is_empty() {
        return Err(MapError::InvalidSong(format!("{} has no id", song)));
    }
    if song.name().trim().is_empty() {
        return Err(MapError::InvalidSong(format!("song {} has no name", song.id())));
    }
    Ok(())
}

/// One query without author filter, then one per author
fn queries_for(variant: &str, authors: &[String]) -> Vec<SearchQuery> {
    std::iter::once(SearchQuery::new(variant))
        .chain(authors.iter().map(|a| SearchQuery::new(variant).author(a.as_str())))
        .collect()
}
