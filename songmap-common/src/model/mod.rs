//! Catalog data model
//!
//! Songs and playlists as seen by any catalog. Identity (`id`) is opaque and
//! only meaningful inside the catalog that issued it.

pub mod playlist;
pub mod song;

pub use playlist::Playlist;
pub use song::Song;

/// Common view over anything a catalog lists: songs and playlists
pub trait Item {
    /// Catalog-specific opaque identifier
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Credited names, in display order
    fn authors(&self) -> &[String];
}
