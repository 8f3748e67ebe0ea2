//! Scripted in-memory catalog
//!
//! Answers searches from a lookup table keyed by exact query name (and
//! optionally author), records every query, and can be told to fail, panic or
//! delay on given names.

use async_trait::async_trait;
use songmap_common::{Item, Song};
use songmap_mapper::{Catalog, CatalogError, SearchQuery};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct StubCatalog {
    by_name: HashMap<String, Vec<Song>>,
    by_name_and_author: HashMap<(String, String), Vec<Song>>,
    fail_all: bool,
    fail_names: HashSet<String>,
    fail_authored: bool,
    panic_names: HashSet<String>,
    delays: HashMap<String, Duration>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Songs returned for a name-only query
    pub fn with_result(mut self, name: &str, songs: Vec<Song>) -> Self {
        self.by_name.entry(name.to_string()).or_default().extend(songs);
        self
    }

    /// Songs returned for a name + author query
    pub fn with_author_result(mut self, name: &str, author: &str, songs: Vec<Song>) -> Self {
        self.by_name_and_author
            .entry((name.to_string(), author.to_string()))
            .or_default()
            .extend(songs);
        self
    }

    /// Every search fails
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Searches for this name fail
    pub fn fail_on(mut self, name: &str) -> Self {
        self.fail_names.insert(name.to_string());
        self
    }

    /// Searches carrying an author filter fail
    pub fn fail_authored(mut self) -> Self {
        self.fail_authored = true;
        self
    }

    /// Searches for this name panic
    pub fn panic_on(mut self, name: &str) -> Self {
        self.panic_names.insert(name.to_string());
        self
    }

    /// Searches for this name sleep first
    pub fn delay_on(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Query names in call order, duplicates included
    pub fn queried_names(&self) -> Vec<String> {
        self.queries().into_iter().map(|q| q.name).collect()
    }
}

#[async_trait]
impl Catalog for StubCatalog {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search_by_attributes(&self, query: &SearchQuery) -> Result<Vec<Song>, CatalogError> {
        self.queries.lock().unwrap().push(query.clone());

        if let Some(delay) = self.delays.get(&query.name) {
            tokio::time::sleep(*delay).await;
        }

        if self.panic_names.contains(&query.name) {
            panic!("stub catalog exploded on '{}'", query.name);
        }

        if self.fail_all
            || self.fail_names.contains(&query.name)
            || (self.fail_authored && query.author.is_some())
        {
            return Err(CatalogError::Network(format!("connection reset while searching '{}'", query.name)));
        }

        let found = match &query.author {
            None => self.by_name.get(&query.name),
            Some(author) => self
                .by_name_and_author
                .get(&(query.name.clone(), author.clone())),
        };
        Ok(found.cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, song_id: &str) -> Result<Option<Song>, CatalogError> {
        let found = self
            .by_name
            .values()
            .chain(self.by_name_and_author.values())
            .flatten()
            .find(|song| song.id() == song_id)
            .cloned();
        Ok(found)
    }
}
