//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{reference_store, settle, BESTSELLER_1_ID};
//!
//! #[tokio::test(start_paused = true)]
//! async fn test_initial_selection() {
//!     let session = ViewStateController::start(reference_store(), Default::default()).unwrap();
//!     settle().await;
//!     assert_eq!(session.snapshot().selected_item_id, Some(BESTSELLER_1_ID));
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{
    advance, catalog_without_related_entry, create_test_catalog_db, ids, reference_data,
    reference_store, settle, write_test_catalog_json, FailingCatalogStore,
};
