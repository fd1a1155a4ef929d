//! In-memory provider used by the engine tests.

use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultSummary};
use popcorn_sources::{MovieProvider, ProviderError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use crate::error::StoreError;
use crate::store::KeyValueStore;
use tokio::sync::Notify;

pub fn movie(imdb_id: &str, title: &str, runtime: &str, imdb_rating: &str) -> MovieDetail {
    MovieDetail {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2000".to_string(),
        poster: None,
        runtime: runtime.to_string(),
        imdb_rating: imdb_rating.to_string(),
        plot: format!("The plot of {}", title),
        released: "01 Jan 2000".to_string(),
        actors: "Someone Famous".to_string(),
        director: "Some Director".to_string(),
        genre: "Drama".to_string(),
    }
}

pub fn catalog() -> Vec<MovieDetail> {
    vec![
        movie("tt1375666", "Inception", "148 min", "8.8"),
        movie("tt0133093", "The Matrix", "136 min", "8.7"),
        movie("tt0234215", "The Matrix Reloaded", "138 min", "7.2"),
        movie("tt0816692", "Interstellar", "169 min", "8.7"),
        movie("tt0000001", "Carmencita", "N/A", "N/A"),
    ]
}

/// Catalog-backed provider. Lookups for a gated key block until the gate is
/// released; broken keys fail with a network error.
#[derive(Default)]
pub struct FakeProvider {
    catalog: Vec<MovieDetail>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    broken: Mutex<HashSet<String>>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn with_catalog(catalog: Vec<MovieDetail>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Hold every lookup for `key` until the returned gate is notified
    pub fn gate(&self, key: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(key.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn break_key(&self, key: &str) {
        self.broken.lock().unwrap().insert(key.to_string());
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Yield until at least `n` searches have reached the provider
    pub async fn searches_started(&self, n: usize) {
        while self.search_calls() < n {
            tokio::task::yield_now().await;
        }
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    async fn pass_gate(&self, key: &str) {
        let gate = self.gates.lock().unwrap().get(key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn is_broken(&self, key: &str) -> bool {
        self.broken.lock().unwrap().contains(key)
    }
}

#[async_trait]
impl MovieProvider for FakeProvider {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultSummary>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate(query).await;

        if self.is_broken(query) {
            return Err(ProviderError::Network("503 Service Unavailable".to_string()));
        }

        let needle = query.to_lowercase();
        let results: Vec<SearchResultSummary> = self
            .catalog
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .map(|m| SearchResultSummary {
                imdb_id: m.imdb_id.clone(),
                title: m.title.clone(),
                year: m.year.clone(),
                poster: m.poster.clone(),
            })
            .collect();

        if results.is_empty() {
            return Err(ProviderError::NotFound("Movie not found!".to_string()));
        }
        Ok(results)
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, ProviderError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate(imdb_id).await;

        if self.is_broken(imdb_id) {
            return Err(ProviderError::Network("connection reset".to_string()));
        }

        self.catalog
            .iter()
            .find(|m| m.imdb_id == imdb_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound("Incorrect IMDb ID.".to_string()))
    }
}

/// Process-local store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
        Ok(())
    }
}
