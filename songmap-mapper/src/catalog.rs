//! Catalog capability
//!
//! The only boundary between the mapper and a concrete music service. HTTP
//! clients, authentication, rate limiting and response parsing all live in
//! implementations of [`Catalog`], never in the mapper.

use songmap_common::Song;
use thiserror::Error;

/// Catalog call errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Attribute search parameters
///
/// Only `name` is required; catalogs ignore hints they cannot use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: String,
    pub author: Option<String>,
    pub year: Option<u16>,
    pub album: Option<String>,
    /// Duration hint in seconds
    pub duration: Option<u32>,
}

impl SearchQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }
}

/// Search capability of a target catalog
///
/// # Example
/// ```rust,ignore
/// struct Deezer { client: reqwest::Client }
///
/// #[async_trait::async_trait]
/// impl Catalog for Deezer {
///     fn name(&self) -> &str { "Deezer" }
///
///     async fn search_by_attributes(&self, query: &SearchQuery) -> Result<Vec<Song>, CatalogError> {
///         // call the service, convert tracks into Song values
///     }
///
///     async fn find_by_id(&self, song_id: &str) -> Result<Option<Song>, CatalogError> {
///         // direct lookup
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Display name used in logs
    fn name(&self) -> &str;

    /// Best-effort search; zero results is not an error
    async fn search_by_attributes(&self, query: &SearchQuery) -> Result<Vec<Song>, CatalogError>;

    /// Direct lookup by catalog id
    async fn find_by_id(&self, song_id: &str) -> Result<Option<Song>, CatalogError>;
}
