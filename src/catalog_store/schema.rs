//! SQLite schema for the catalog database.
//!
//! Lists are stored with an explicit `position` column so that the source
//! order (display order, descending similarity) survives the round trip.

/// Value stored in `PRAGMA user_version` for databases written by this schema.
pub const CATALOG_SCHEMA_VERSION: i64 = 1;

pub const CATALOG_SCHEMA: &str = "
CREATE TABLE bestsellers (
    position INTEGER PRIMARY KEY,
    id INTEGER NOT NULL UNIQUE,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    genre TEXT NOT NULL,
    rating REAL NOT NULL,
    price REAL NOT NULL,
    sales INTEGER NOT NULL
);

CREATE TABLE related_items (
    source_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    id INTEGER NOT NULL,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    genre TEXT NOT NULL,
    rating REAL NOT NULL,
    price REAL NOT NULL,
    similarity REAL NOT NULL,
    PRIMARY KEY (source_id, position)
);

CREATE TABLE candidates (
    position INTEGER PRIMARY KEY,
    id INTEGER NOT NULL,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    genre TEXT NOT NULL,
    rating REAL NOT NULL,
    price REAL NOT NULL,
    relevance_score REAL NOT NULL
);
";
