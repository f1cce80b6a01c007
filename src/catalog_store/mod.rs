mod load;
mod memory_store;
mod models;
mod null_store;
mod schema;
mod store;
mod trait_def;

pub use load::{load_catalog, parse_catalog_json, validate_catalog, LoadCatalogProblem};
pub use memory_store::MemoryCatalogStore;
pub use models::*;
pub use null_store::NullCatalogStore;
pub use schema::CATALOG_SCHEMA_VERSION;
pub use store::SqliteCatalogStore;
pub use trait_def::CatalogStore;
