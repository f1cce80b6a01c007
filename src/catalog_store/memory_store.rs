//! In-memory catalog store.
//!
//! Backs the session with a `CatalogData` snapshot, either the compiled-in
//! reference catalog or a JSON document loaded from disk.

use super::load::{load_catalog, parse_catalog_json};
use super::models::{Bestseller, CatalogData, ItemId, RankedBook, SimilarBook};
use super::trait_def::CatalogStore;
use anyhow::Result;
use std::path::Path;

const REFERENCE_CATALOG_JSON: &str = include_str!("../../data/reference_catalog.json");

#[derive(Debug, Clone)]
pub struct MemoryCatalogStore {
    data: CatalogData,
}

impl MemoryCatalogStore {
    pub fn new(data: CatalogData) -> Self {
        Self { data }
    }

    /// The reference catalog shipped with the crate.
    pub fn reference() -> Result<Self> {
        Self::from_json_str(REFERENCE_CATALOG_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(parse_catalog_json(json)?))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(load_catalog(path)?))
    }

    pub fn data(&self) -> &CatalogData {
        &self.data
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn get_bestsellers(&self) -> Result<Vec<Bestseller>> {
        Ok(self.data.bestsellers.clone())
    }

    fn get_related_items(&self, id: ItemId) -> Result<Option<Vec<SimilarBook>>> {
        Ok(self.data.related_items.get(&id).cloned())
    }

    fn get_candidate_pool(&self) -> Result<Vec<RankedBook>> {
        Ok(self.data.candidates.clone())
    }

    fn get_bestseller(&self, id: ItemId) -> Result<Option<Bestseller>> {
        Ok(self
            .data
            .bestsellers
            .iter()
            .find(|b| b.item.id == id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::load::validate_catalog;
    use crate::catalog_store::models::Genre;

    #[test]
    fn test_reference_catalog_loads_cleanly() {
        let store = MemoryCatalogStore::reference().unwrap();
        assert!(validate_catalog(store.data()).is_empty());

        let bestsellers = store.get_bestsellers().unwrap();
        assert_eq!(bestsellers.len(), 5);
        assert_eq!(bestsellers[0].item.title, "The Midnight Library");
        assert_eq!(bestsellers[0].sales, 15420);

        assert_eq!(store.get_candidate_pool().unwrap().len(), 6);
        assert_eq!(store.get_genre_options().len(), 8);
    }

    #[test]
    fn test_related_items_keep_source_order() {
        let store = MemoryCatalogStore::reference().unwrap();
        let related = store.get_related_items(2).unwrap().unwrap();
        let titles: Vec<&str> = related.iter().map(|b| b.item.title.as_str()).collect();
        assert_eq!(titles, vec!["Deep Work", "The Power of Habit", "Mindset"]);
        assert!(related.iter().all(|b| b.item.genre == Genre::SelfHelp));
    }

    #[test]
    fn test_missing_related_entry_is_none() {
        let store = MemoryCatalogStore::reference().unwrap();
        assert!(store.get_related_items(42).unwrap().is_none());
        assert!(store.get_bestseller(42).unwrap().is_none());
        assert_eq!(
            store.get_bestseller(4).unwrap().unwrap().item.title,
            "Educated"
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, REFERENCE_CATALOG_JSON).unwrap();
        let store = MemoryCatalogStore::load(&path).unwrap();
        assert_eq!(store.get_bestsellers().unwrap().len(), 5);
    }
}
