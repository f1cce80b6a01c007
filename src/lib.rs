//! Book Recommender Library
//!
//! Catalog access, filtering and similarity lookup for a book discovery
//! session, plus the controller that owns the session's view state.

pub mod analysis;
pub mod catalog_store;
pub mod config;
pub mod logging;
pub mod search;
pub mod similarity;
pub mod view;

// Re-export commonly used types for convenience
pub use catalog_store::{
    CatalogStore, MemoryCatalogStore, NullCatalogStore, SqliteCatalogStore,
};
pub use config::{AppConfig, FileConfig, SessionSettings};
pub use search::{Criteria, QueryFilterEngine};
pub use similarity::SimilarityLookup;
pub use view::{SessionSnapshot, ViewMode, ViewStateController};
