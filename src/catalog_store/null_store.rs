//! Null catalog store implementation.
//!
//! An empty catalog, for sessions that have nothing to show yet and for tests.

use super::models::{Bestseller, ItemId, RankedBook, SimilarBook};
use super::trait_def::CatalogStore;
use anyhow::Result;

/// A catalog store with no bestsellers, no related items and no candidates.
pub struct NullCatalogStore;

impl CatalogStore for NullCatalogStore {
    fn get_bestsellers(&self) -> Result<Vec<Bestseller>> {
        Ok(Vec::new())
    }

    fn get_related_items(&self, _id: ItemId) -> Result<Option<Vec<SimilarBook>>> {
        Ok(None)
    }

    fn get_candidate_pool(&self) -> Result<Vec<RankedBook>> {
        Ok(Vec::new())
    }
}
