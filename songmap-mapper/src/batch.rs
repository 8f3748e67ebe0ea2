//! Batch fan-out and aggregation
//!
//! Runs [`SongMapper::map_song`] for every source song, either one after the
//! other or on a bounded pool of concurrent workers, and folds the per-song
//! results into a [`MappingReport`].
//!
//! Each song's outcome is an explicit [`SongOutcome`]: a song that errors or
//! panics becomes `Failed` and the batch carries on. The report always holds
//! one entry per distinct source song id.

use crate::catalog::Catalog;
use crate::coordinator::{SongMapper, SongMapping};
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use serde::Serialize;
use songmap_common::config::MapperConfig;
use songmap_common::{Item, Song};
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info};

/// Per-song result consumed by the aggregation step
#[derive(Debug, Clone)]
pub enum SongOutcome {
    Mapped(SongMapping),
    Failed(SongFailure),
}

/// Song that could not be reconciled at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongFailure {
    pub source_id: String,
    pub reason: String,
}

/// Aggregate result of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingReport {
    /// Source song id → chosen target song ids (empty when nothing matched)
    pub mappings: BTreeMap<String, Vec<String>>,
    /// Songs whose reconciliation failed; they also appear in `mappings` with no ids
    pub failures: Vec<SongFailure>,
}

impl MappingReport {
    fn record(&mut self, outcome: SongOutcome) {
        match outcome {
            SongOutcome::Mapped(mapping) => {
                self.mappings.insert(mapping.source_id, mapping.target_ids);
            }
            SongOutcome::Failed(failure) => {
                self.mappings.insert(failure.source_id.clone(), Vec::new());
                self.failures.push(failure);
            }
        }
    }

    /// Songs with at least one matched id
    pub fn found(&self) -> usize {
        self.mappings.values().filter(|ids| !ids.is_empty()).count()
    }

    /// Songs in the report
    pub fn total(&self) -> usize {
        self.mappings.len()
    }

    /// Matched ids for a source song
    pub fn get(&self, source_id: &str) -> Option<&[String]> {
        self.mappings.get(source_id).map(Vec::as_slice)
    }

    /// Flat `source id → [target ids]` map for export
    pub fn to_export_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.mappings
    }
}

/// Batch reconciliation over a worker pool
#[derive(Clone)]
pub struct BatchMapper {
    mapper: SongMapper,
    workers: usize,
}

impl BatchMapper {
    /// `workers` of 0 or 1 means sequential processing
    pub fn new(mapper: SongMapper, workers: usize) -> Self {
        Self { mapper, workers }
    }

    pub fn from_config(catalog: Arc<dyn Catalog>, config: &MapperConfig) -> Self {
        Self::new(SongMapper::from_config(catalog, config), config.workers)
    }

    pub fn mapper(&self) -> &SongMapper {
        &self.mapper
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Reconcile all songs with the configured worker count
    pub async fn map_songs(&self, songs: &[Song]) -> MappingReport {
        if self.workers <= 1 {
            self.map_songs_sequential(songs).await
        } else {
            self.map_songs_concurrent(songs, self.workers).await
        }
    }

    /// One song at a time, in input order
    pub async fn map_songs_sequential(&self, songs: &[Song]) -> MappingReport {
        info!(songs = songs.len(), catalog = self.mapper.catalog().name(), "Mapping songs sequentially");

        let mut report = MappingReport::default();
        for (index, song) in songs.iter().enumerate() {
            report.record(self.run_one(song, index + 1).await);
        }

        log_summary(&report);
        report
    }

    /// Up to `workers` songs in flight; each worker finishes a song before taking the next
    pub async fn map_songs_concurrent(&self, songs: &[Song], workers: usize) -> MappingReport {
        let workers = workers.max(1);
        info!(
            songs = songs.len(),
            workers,
            catalog = self.mapper.catalog().name(),
            "Mapping songs concurrently"
        );

        let outcomes: Vec<SongOutcome> = stream::iter(songs.iter().enumerate())
            .map(|(index, song)| self.run_one(song, index + 1))
            .buffer_unordered(workers)
            .collect()
            .await;

        let mut report = MappingReport::default();
        for outcome in outcomes {
            report.record(outcome);
        }

        log_summary(&report);
        report
    }

    /// Per-song boundary: errors and panics become `SongOutcome::Failed`
    async fn run_one(&self, song: &Song, index: usize) -> SongOutcome {
        let result = AssertUnwindSafe(self.mapper.map_song(song, index))
            .catch_unwind()
            .await;

        let reason = match result {
            Ok(Ok(mapping)) => return SongOutcome::Mapped(mapping),
            Ok(Err(e)) => e.to_string(),
            Err(panic) => format!("panicked: {}", panic_message(panic.as_ref())),
        };

        error!(index, source_id = song.id(), reason = %reason, "{}: Failed {}: {}", index, song, reason);
        SongOutcome::Failed(SongFailure {
            source_id: song.id().to_string(),
            reason,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn log_summary(report: &MappingReport) {
    info!(
        found = report.found(),
        total = report.total(),
        failed = report.failures.len(),
        "Found {} of {}",
        report.found(),
        report.total()
    );
}
