//! SQLite-backed catalog store implementation.
//!
//! Reads the bestseller list, related items and search candidates from a
//! catalog database written by `SqliteCatalogStore::create`.

use super::models::*;
use super::schema::{CATALOG_SCHEMA, CATALOG_SCHEMA_VERSION};
use super::trait_def::CatalogStore;
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, thiserror::Error)]
#[error("Unknown genre label: {0}")]
struct UnknownGenre(String);

/// Read-only SQLite catalog store.
pub struct SqliteCatalogStore {
    conn: Mutex<Connection>,
}

/// Reads the shared item columns starting at `offset`:
/// id, title, author, genre, rating, price.
fn read_item(row: &Row, offset: usize) -> rusqlite::Result<CatalogItem> {
    let genre_label: String = row.get(offset + 3)?;
    let genre = Genre::from_label(&genre_label).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            offset + 3,
            rusqlite::types::Type::Text,
            Box::new(UnknownGenre(genre_label.clone())),
        )
    })?;
    Ok(CatalogItem {
        id: row.get(offset)?,
        title: row.get(offset + 1)?,
        author: row.get(offset + 2)?,
        genre,
        rating: row.get(offset + 4)?,
        price: row.get(offset + 5)?,
    })
}

/// Reads a sales count, rejecting negative values instead of wrapping them.
fn read_sales(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    let sales: i64 = row.get(idx)?;
    u64::try_from(sales).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, sales))
}

impl SqliteCatalogStore {
    /// Open an existing catalog database read-only.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open catalog database {:?}", db_path))?;

        let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        if db_version == 0 {
            bail!("{:?} is not a catalog database", db_path);
        }
        if db_version > CATALOG_SCHEMA_VERSION {
            bail!(
                "Catalog database version {} is newer than supported version {}",
                db_version,
                CATALOG_SCHEMA_VERSION
            );
        }

        let bestseller_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM bestsellers", [], |r| r.get(0))?;
        let candidate_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM candidates", [], |r| r.get(0))?;
        info!(
            "Opened SQLite catalog: {} bestsellers, {} search candidates",
            bestseller_count, candidate_count
        );

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Write `data` into a new catalog database at `db_path` and open it.
    pub fn create<P: AsRef<Path>>(db_path: P, data: &CatalogData) -> Result<Self> {
        let db_path = db_path.as_ref();
        if db_path.exists() {
            bail!("Catalog database {:?} already exists", db_path);
        }
        let mut conn = Connection::open(db_path)
            .with_context(|| format!("Failed to create catalog database {:?}", db_path))?;
        conn.execute_batch(CATALOG_SCHEMA)?;

        let tx = conn.transaction()?;
        for (position, b) in data.bestsellers.iter().enumerate() {
            let sales = i64::try_from(b.sales).with_context(|| {
                format!(
                    "Sales count {} of bestseller {} does not fit the catalog database",
                    b.sales, b.item.id
                )
            })?;
            tx.execute(
                "INSERT INTO bestsellers (position, id, title, author, genre, rating, price, sales)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    position as i64,
                    b.item.id,
                    b.item.title,
                    b.item.author,
                    b.item.genre.label(),
                    b.item.rating,
                    b.item.price,
                    sales
                ],
            )?;
        }
        for (source_id, related) in &data.related_items {
            for (position, s) in related.iter().enumerate() {
                tx.execute(
                    "INSERT INTO related_items
                     (source_id, position, id, title, author, genre, rating, price, similarity)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        source_id,
                        position as i64,
                        s.item.id,
                        s.item.title,
                        s.item.author,
                        s.item.genre.label(),
                        s.item.rating,
                        s.item.price,
                        s.similarity
                    ],
                )?;
            }
        }
        for (position, c) in data.candidates.iter().enumerate() {
            tx.execute(
                "INSERT INTO candidates
                 (position, id, title, author, genre, rating, price, relevance_score)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    position as i64,
                    c.item.id,
                    c.item.title,
                    c.item.author,
                    c.item.genre.label(),
                    c.item.rating,
                    c.item.price,
                    c.relevance_score
                ],
            )?;
        }
        tx.pragma_update(None, "user_version", CATALOG_SCHEMA_VERSION)?;
        tx.commit()?;
        drop(conn);

        Self::open(db_path)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("Catalog connection mutex poisoned"))
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn get_bestsellers(&self) -> Result<Vec<Bestseller>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, title, author, genre, rating, price, sales
             FROM bestsellers ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Bestseller {
                item: read_item(row, 0)?,
                sales: read_sales(row, 6)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get_related_items(&self, id: ItemId) -> Result<Option<Vec<SimilarBook>>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, title, author, genre, rating, price, similarity
             FROM related_items WHERE source_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![id], |row| {
            Ok(SimilarBook {
                item: read_item(row, 0)?,
                similarity: row.get(6)?,
            })
        })?;
        let related = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        // An entry with an empty list cannot be told apart from a missing one.
        Ok(if related.is_empty() {
            None
        } else {
            Some(related)
        })
    }

    fn get_candidate_pool(&self) -> Result<Vec<RankedBook>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, title, author, genre, rating, price, relevance_score
             FROM candidates ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RankedBook {
                item: read_item(row, 0)?,
                relevance_score: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get_bestseller(&self, id: ItemId) -> Result<Option<Bestseller>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, title, author, genre, rating, price, sales
             FROM bestsellers WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], |row| {
            Ok(Bestseller {
                item: read_item(row, 0)?,
                sales: read_sales(row, 6)?,
            })
        })?;
        Ok(rows.next().transpose()?)
    }
}
