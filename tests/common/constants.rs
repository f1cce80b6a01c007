//! Shared constants for integration tests
//!
//! Ids and titles refer to the compiled-in reference catalog. When the
//! reference data changes, update only this file.
#![allow(dead_code)]

use book_recommender::catalog_store::ItemId;

// ============================================================================
// Bestsellers
// ============================================================================

/// "The Midnight Library" by Matt Haig, the implicit initial selection
pub const BESTSELLER_1_ID: ItemId = 1;
pub const BESTSELLER_1_TITLE: &str = "The Midnight Library";

/// "Atomic Habits" by James Clear
pub const BESTSELLER_2_ID: ItemId = 2;
pub const BESTSELLER_2_TITLE: &str = "Atomic Habits";

/// "Where the Crawdads Sing" by Delia Owens
pub const BESTSELLER_3_ID: ItemId = 3;

/// "The Silent Patient" by Alex Michaelides
pub const BESTSELLER_5_ID: ItemId = 5;

pub const BESTSELLER_COUNT: usize = 5;

/// An id that is not in the bestseller list
pub const UNKNOWN_ITEM_ID: ItemId = 999;

// ============================================================================
// Related items, in stored (descending similarity) order
// ============================================================================

pub const RELATED_TO_1: [ItemId; 3] = [6, 7, 8];
pub const RELATED_TO_2: [ItemId; 3] = [9, 10, 11];
pub const RELATED_TO_3: [ItemId; 3] = [12, 13, 14];

// ============================================================================
// Candidate pool
// ============================================================================

pub const CANDIDATE_IDS: [ItemId; 6] = [21, 22, 23, 24, 25, 26];

/// Candidates whose genre is Fiction
pub const FICTION_CANDIDATE_IDS: [ItemId; 3] = [21, 24, 26];

/// Candidates written by Taylor Jenkins Reid
pub const TAYLOR_CANDIDATE_IDS: [ItemId; 2] = [21, 26];

// ============================================================================
// Simulated delays (defaults)
// ============================================================================

pub const INITIAL_LOAD_DELAY_MS: u64 = 800;
pub const FETCH_DELAY_MS: u64 = 500;
