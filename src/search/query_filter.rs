//! Criteria search over the candidate pool.
//!
//! Every active filter is applied conjunctively and the candidates keep
//! their original relative order. `relevance_score` is carried along for
//! display but never used to reorder.

use super::criteria::Criteria;
use crate::catalog_store::{CatalogStore, GenreFilter, RankedBook};
use std::sync::Arc;
use tracing::{debug, warn};

/// Genre filter, active unless the criteria ask for all genres.
fn matches_genre(book: &RankedBook, genre: &GenreFilter) -> bool {
    genre.matches(book.item.genre)
}

/// Author filter, active when the author text is not blank.
///
/// `needle` must already be lowercased. Only blankness is judged on the
/// trimmed text; the substring match uses the text as entered.
fn matches_author(book: &RankedBook, needle: &str) -> bool {
    needle.trim().is_empty() || book.item.author.to_lowercase().contains(needle)
}

/// Rating filter, active when `min_rating` is above zero.
fn matches_rating(book: &RankedBook, min_rating: f64) -> bool {
    !(min_rating > 0.0) || book.item.rating >= min_rating
}

/// Filter `candidates` by `criteria`, preserving the candidates' order.
///
/// Returns an empty vector when nothing survives.
pub fn search(candidates: &[RankedBook], criteria: &Criteria) -> Vec<RankedBook> {
    let author_needle = criteria.author.to_lowercase();

    candidates
        .iter()
        .filter(|book| matches_genre(book, &criteria.genre))
        .filter(|book| matches_author(book, &author_needle))
        .filter(|book| matches_rating(book, criteria.min_rating))
        .cloned()
        .collect()
}

/// Runs criteria searches against the candidate pool of a catalog store.
#[derive(Clone)]
pub struct QueryFilterEngine {
    store: Arc<dyn CatalogStore>,
}

impl QueryFilterEngine {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Search the store's candidate pool.
    ///
    /// A failing backend yields an empty result instead of an error.
    pub fn run(&self, criteria: &Criteria) -> Vec<RankedBook> {
        let candidates = match self.store.get_candidate_pool() {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!("Candidate pool unavailable, returning no results: {:#}", err);
                return Vec::new();
            }
        };
        let results = search(&candidates, criteria);
        debug!(
            "Search {:?} kept {} of {} candidates",
            criteria,
            results.len(),
            candidates.len()
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::{
        Bestseller, CatalogItem, Genre, ItemId, MemoryCatalogStore, SimilarBook,
    };
    use anyhow::{bail, Result};

    fn candidate(id: ItemId, author: &str, genre: Genre, rating: f64, score: f64) -> RankedBook {
        RankedBook {
            item: CatalogItem {
                id,
                title: format!("Book {}", id),
                author: author.to_string(),
                genre,
                rating,
                price: 9.99,
            },
            relevance_score: score,
        }
    }

    fn ids(books: &[RankedBook]) -> Vec<ItemId> {
        books.iter().map(|b| b.item.id).collect()
    }

    #[test]
    fn test_concrete_fiction_rating_scenario() {
        let pool = vec![
            candidate(1, "A", Genre::Fiction, 4.6, 0.5),
            candidate(2, "B", Genre::Fiction, 4.4, 0.9),
            candidate(3, "C", Genre::Thriller, 4.6, 0.7),
        ];
        let criteria = Criteria::default()
            .with_genre(Genre::Fiction)
            .with_min_rating(4.5);
        assert_eq!(ids(&search(&pool, &criteria)), vec![1]);
    }

    #[test]
    fn test_default_criteria_return_full_pool_in_order() {
        let store = MemoryCatalogStore::reference().unwrap();
        let pool = store.get_candidate_pool().unwrap();
        assert_eq!(search(&pool, &Criteria::default()), pool);
    }

    #[test]
    fn test_order_ignores_relevance_score() {
        let pool = vec![
            candidate(1, "X", Genre::Mystery, 3.0, 0.1),
            candidate(2, "X", Genre::Mystery, 3.0, 0.9),
            candidate(3, "X", Genre::Mystery, 3.0, 0.5),
        ];
        let criteria = Criteria::default().with_genre(Genre::Mystery);
        assert_eq!(ids(&search(&pool, &criteria)), vec![1, 2, 3]);
    }

    #[test]
    fn test_author_is_case_insensitive_substring() {
        let store = MemoryCatalogStore::reference().unwrap();
        let pool = store.get_candidate_pool().unwrap();
        let results = search(&pool, &Criteria::default().with_author("jenkins REID"));
        assert_eq!(ids(&results), vec![21, 26]);
        // Blank text disables the filter
        let results = search(&pool, &Criteria::default().with_author("   "));
        assert_eq!(results.len(), pool.len());
    }

    #[test]
    fn test_author_whitespace_is_part_of_the_match() {
        let store = MemoryCatalogStore::reference().unwrap();
        let pool = store.get_candidate_pool().unwrap();
        assert!(search(&pool, &Criteria::default().with_author("Reid ")).is_empty());
        assert!(search(&pool, &Criteria::default().with_author(" Taylor")).is_empty());
        let results = search(&pool, &Criteria::default().with_author("Jenkins "));
        assert_eq!(ids(&results), vec![21, 26]);
    }

    #[test]
    fn test_min_rating_is_inclusive() {
        let pool = vec![
            candidate(1, "A", Genre::Fiction, 4.5, 0.5),
            candidate(2, "A", Genre::Fiction, 4.49, 0.5),
        ];
        let criteria = Criteria::default().with_min_rating(4.5);
        assert_eq!(ids(&search(&pool, &criteria)), vec![1]);
    }

    #[test]
    fn test_no_survivors_is_empty_not_error() {
        let store = MemoryCatalogStore::reference().unwrap();
        let pool = store.get_candidate_pool().unwrap();
        let criteria = Criteria::default()
            .with_genre(Genre::Romance)
            .with_author("nobody");
        assert!(search(&pool, &criteria).is_empty());
        assert!(search(&[], &Criteria::default()).is_empty());
    }

    #[test]
    fn test_filters_compose_conjunctively_over_truth_table() {
        // One candidate per combination of (genre ok, author ok, rating ok).
        let mut pool = Vec::new();
        let mut id = 0;
        for genre_ok in [false, true] {
            for author_ok in [false, true] {
                for rating_ok in [false, true] {
                    id += 1;
                    pool.push(candidate(
                        id,
                        if author_ok { "Ann Leckie" } else { "Bob Smith" },
                        if genre_ok { Genre::ScienceFiction } else { Genre::Romance },
                        if rating_ok { 4.8 } else { 3.2 },
                        0.5,
                    ));
                }
            }
        }

        let genre = GenreFilter::Only(Genre::ScienceFiction);
        for use_genre in [false, true] {
            for use_author in [false, true] {
                for use_rating in [false, true] {
                    let criteria = Criteria {
                        genre: if use_genre { genre } else { GenreFilter::All },
                        author: if use_author { "leckie".to_string() } else { String::new() },
                        min_rating: if use_rating { 4.0 } else { 0.0 },
                    };
                    let expected: Vec<ItemId> = pool
                        .iter()
                        .filter(|b| !use_genre || b.item.genre == Genre::ScienceFiction)
                        .filter(|b| !use_author || b.item.author == "Ann Leckie")
                        .filter(|b| !use_rating || b.item.rating >= 4.0)
                        .map(|b| b.item.id)
                        .collect();
                    let results = search(&pool, &criteria);
                    assert_eq!(ids(&results), expected, "criteria {:?}", criteria);
                    assert!(results.iter().all(|r| pool.contains(r)));
                }
            }
        }
    }

    struct FailingStore;

    impl CatalogStore for FailingStore {
        fn get_bestsellers(&self) -> Result<Vec<Bestseller>> {
            bail!("backend down")
        }

        fn get_related_items(&self, _id: ItemId) -> Result<Option<Vec<SimilarBook>>> {
            bail!("backend down")
        }

        fn get_candidate_pool(&self) -> Result<Vec<RankedBook>> {
            bail!("backend down")
        }
    }

    #[test]
    fn test_engine_degrades_backend_errors_to_empty() {
        let engine = QueryFilterEngine::new(Arc::new(FailingStore));
        assert!(engine.run(&Criteria::default()).is_empty());
    }

    #[test]
    fn test_engine_searches_store_pool() {
        let engine = QueryFilterEngine::new(Arc::new(MemoryCatalogStore::reference().unwrap()));
        let results = engine.run(&Criteria::default().with_genre(Genre::Fiction));
        assert_eq!(ids(&results), vec![21, 24, 26]);
    }
}
