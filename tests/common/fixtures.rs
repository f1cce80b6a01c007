//! Test fixtures: catalogs, stores and clock helpers.
#![allow(dead_code)]

use anyhow::{bail, Result};
use book_recommender::catalog_store::{
    Bestseller, CatalogData, CatalogStore, ItemId, MemoryCatalogStore, RankedBook, SimilarBook,
    SqliteCatalogStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use super::constants::INITIAL_LOAD_DELAY_MS;

pub fn reference_data() -> CatalogData {
    MemoryCatalogStore::reference()
        .expect("reference catalog must parse")
        .data()
        .clone()
}

pub fn reference_store() -> Arc<dyn CatalogStore> {
    Arc::new(MemoryCatalogStore::new(reference_data()))
}

/// The reference catalog with the related-items entry of `id` removed.
pub fn catalog_without_related_entry(id: ItemId) -> CatalogData {
    let mut data = reference_data();
    data.related_items.remove(&id);
    data
}

/// Creates a temporary SQLite catalog holding the reference data.
/// Returns (temp_dir, catalog_db_path)
pub fn create_test_catalog_db() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("catalog.db");
    SqliteCatalogStore::create(&path, &reference_data())?;
    Ok((dir, path))
}

/// Writes the reference data as a JSON catalog document.
/// Returns (temp_dir, catalog_json_path)
pub fn write_test_catalog_json() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, serde_json::to_string_pretty(&reference_data())?)?;
    Ok((dir, path))
}

/// A backend whose every read fails.
pub struct FailingCatalogStore;

impl CatalogStore for FailingCatalogStore {
    fn get_bestsellers(&self) -> Result<Vec<Bestseller>> {
        bail!("catalog backend offline")
    }

    fn get_related_items(&self, _id: ItemId) -> Result<Option<Vec<SimilarBook>>> {
        bail!("catalog backend offline")
    }

    fn get_candidate_pool(&self) -> Result<Vec<RankedBook>> {
        bail!("catalog backend offline")
    }
}

/// Let the paused clock run forward by `ms`.
pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Wait until the initial load and the initial selection fetch are done.
pub async fn settle() {
    advance(INITIAL_LOAD_DELAY_MS + 100).await;
}

pub fn ids<T>(books: &[T], id_of: impl Fn(&T) -> ItemId) -> Vec<ItemId> {
    books.iter().map(id_of).collect()
}
