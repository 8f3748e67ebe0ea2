//! songmap-mapper: cross-catalog song reconciliation
//!
//! Takes songs known in a source catalog and finds the same songs in a target
//! catalog reached through the [`Catalog`] capability.
//!
//! Pipeline per song:
//! 1. [`expander`] normalises the name, extracts credits and proposes name variants
//! 2. [`coordinator`] searches the target catalog for every variant
//! 3. [`classifier`] buckets the accumulated candidates
//! 4. [`batch`] runs many songs on a bounded worker pool and aggregates the results

pub mod batch;
pub mod catalog;
pub mod classifier;
pub mod coordinator;
pub mod error;
pub mod expander;

pub use batch::{BatchMapper, MappingReport, SongFailure, SongOutcome};
pub use catalog::{Catalog, CatalogError, SearchQuery};
pub use classifier::{Classifier, SimilarSongs};
pub use coordinator::{MatchOutcome, SongMapper, SongMapping};
pub use error::{MapError, MapResult};
