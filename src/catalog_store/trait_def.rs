//! CatalogStore trait definition.
//!
//! This trait abstracts the read-only catalog so the compiled-in reference
//! data can be swapped for a real backend without touching the search,
//! similarity or view layers.

use super::models::{Bestseller, GenreFilter, ItemId, RankedBook, SimilarBook};
use anyhow::Result;

/// Trait for catalog storage backends.
///
/// Reads are fallible so that real backends can report failures; the layers
/// above translate any error into an empty result.
pub trait CatalogStore: Send + Sync {
    /// Get the bestseller list, in display order.
    fn get_bestsellers(&self) -> Result<Vec<Bestseller>>;

    /// Get the precomputed related items for a bestseller.
    ///
    /// `Ok(None)` means the id has no entry, which is a valid state.
    fn get_related_items(&self, id: ItemId) -> Result<Option<Vec<SimilarBook>>>;

    /// Get the pool of candidates eligible for criteria search, in order.
    fn get_candidate_pool(&self) -> Result<Vec<RankedBook>>;

    /// Get the genre selector options, "All Genres" first.
    fn get_genre_options(&self) -> Vec<GenreFilter> {
        GenreFilter::options()
    }

    /// Get a single bestseller by id.
    fn get_bestseller(&self, id: ItemId) -> Result<Option<Bestseller>> {
        Ok(self
            .get_bestsellers()?
            .into_iter()
            .find(|b| b.item.id == id))
    }
}
