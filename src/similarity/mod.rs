//! Selection-keyed lookup of precomputed related items.
//!
//! There is no ranking here: the related-items lists arrive ordered by
//! descending similarity and are returned exactly as stored.

use crate::catalog_store::{Bestseller, CatalogStore, ItemId, SimilarBook};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct SimilarityLookup {
    store: Arc<dyn CatalogStore>,
}

impl SimilarityLookup {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Related items for `selected_id`, or an empty list when the id has
    /// no entry or the backend fails.
    pub fn related_to(&self, selected_id: ItemId) -> Vec<SimilarBook> {
        match self.store.get_related_items(selected_id) {
            Ok(Some(related)) => related,
            Ok(None) => {
                debug!("No related items for {}", selected_id);
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "Related items for {} unavailable, returning none: {:#}",
                    selected_id, err
                );
                Vec::new()
            }
        }
    }

    /// Find a bestseller by title, ignoring case and surrounding whitespace.
    pub fn find_bestseller_by_title(&self, title: &str) -> Option<Bestseller> {
        if title.trim().is_empty() {
            return None;
        }
        let bestsellers = match self.store.get_bestsellers() {
            Ok(bestsellers) => bestsellers,
            Err(err) => {
                warn!("Bestseller list unavailable: {:#}", err);
                return None;
            }
        };
        bestsellers
            .into_iter()
            .find(|b| b.item.title_matches(title))
    }

    /// Related items for the bestseller titled `title`; empty when unknown.
    pub fn related_to_title(&self, title: &str) -> Vec<SimilarBook> {
        self.find_bestseller_by_title(title)
            .map(|b| self.related_to(b.item.id))
            .unwrap_or_default()
    }

    /// Sorted, de-duplicated bestseller titles.
    pub fn bestseller_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = match self.store.get_bestsellers() {
            Ok(bestsellers) => bestsellers.into_iter().map(|b| b.item.title).collect(),
            Err(err) => {
                warn!("Bestseller list unavailable: {:#}", err);
                return Vec::new();
            }
        };
        titles.sort();
        titles.dedup();
        titles
    }
}
