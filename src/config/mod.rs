mod file_config;

pub use file_config::{FileConfig, SessionConfig};

use crate::catalog_store::{CatalogStore, MemoryCatalogStore, SqliteCatalogStore};
use crate::view::ViewMode;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(PartialEq, Eq, Clone, Copy, Debug, clap::ValueEnum)]
pub enum CatalogBackend {
    /// The compiled-in reference catalog
    Reference,
    /// A JSON catalog document
    Json,
    /// A SQLite catalog database
    Sqlite,
}

/// Where the session's catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Reference,
    Json(PathBuf),
    Sqlite(PathBuf),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: CatalogSource,
    pub log_level: String,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Delay before the session first becomes interactive.
    pub initial_load_delay: Duration,
    pub selection_fetch_delay: Duration,
    pub search_delay: Duration,
    pub initial_mode: ViewMode,
    /// Number of genres/authors listed in the analysis summary.
    pub analysis_top_n: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            initial_load_delay: Duration::from_millis(800),
            selection_fetch_delay: Duration::from_millis(500),
            search_delay: Duration::from_millis(500),
            initial_mode: ViewMode::Query,
            analysis_top_n: 10,
        }
    }
}

impl SessionSettings {
    /// Settings with every simulated delay removed.
    pub fn immediate() -> Self {
        Self {
            initial_load_delay: Duration::ZERO,
            selection_fetch_delay: Duration::ZERO,
            search_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    fn resolve(file: SessionConfig) -> Self {
        let defaults = Self::default();
        Self {
            initial_load_delay: file
                .initial_load_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.initial_load_delay),
            selection_fetch_delay: file
                .selection_fetch_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.selection_fetch_delay),
            search_delay: file
                .search_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_delay),
            initial_mode: file
                .initial_mode
                .and_then(|s| parse_view_mode(&s))
                .unwrap_or(defaults.initial_mode),
            analysis_top_n: file.analysis_top_n.unwrap_or(defaults.analysis_top_n),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from an optional TOML file config, filling in
    /// defaults for everything it leaves out.
    pub fn resolve(file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_path = file.catalog_path.map(PathBuf::from);
        let backend = match file.catalog_backend {
            Some(s) => match parse_catalog_backend(&s) {
                Some(backend) => backend,
                None => bail!("Unknown catalog backend: {}", s),
            },
            None => infer_backend(catalog_path.as_deref()),
        };

        let catalog = match (backend, catalog_path) {
            (CatalogBackend::Reference, None) => CatalogSource::Reference,
            (CatalogBackend::Reference, Some(path)) => {
                bail!("catalog_path {:?} is not used by the reference backend", path)
            }
            (_, None) => bail!("catalog_path must be specified for the {:?} backend", backend),
            (backend, Some(path)) => {
                if !path.exists() {
                    bail!("Catalog file does not exist: {:?}", path);
                }
                if !path.is_file() {
                    bail!("catalog_path is not a file: {:?}", path);
                }
                match backend {
                    CatalogBackend::Sqlite => CatalogSource::Sqlite(path),
                    _ => CatalogSource::Json(path),
                }
            }
        };

        let log_level = file
            .log_level
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let session = SessionSettings::resolve(file.session.unwrap_or_default());

        Ok(Self {
            catalog,
            log_level,
            session,
        })
    }

    /// Open the configured catalog store.
    pub fn open_catalog(&self) -> Result<Arc<dyn CatalogStore>> {
        Ok(match &self.catalog {
            CatalogSource::Reference => Arc::new(MemoryCatalogStore::reference()?),
            CatalogSource::Json(path) => Arc::new(MemoryCatalogStore::load(path)?),
            CatalogSource::Sqlite(path) => Arc::new(SqliteCatalogStore::open(path)?),
        })
    }
}

/// Databases are recognised by extension, anything else is read as JSON.
fn infer_backend(path: Option<&Path>) -> CatalogBackend {
    match path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        None if path.is_none() => CatalogBackend::Reference,
        Some("db") | Some("sqlite") | Some("sqlite3") => CatalogBackend::Sqlite,
        _ => CatalogBackend::Json,
    }
}

/// Parses a view mode string. Uses clap's ValueEnum trait for parsing.
fn parse_view_mode(s: &str) -> Option<ViewMode> {
    ViewMode::from_str(s, true).ok()
}

fn parse_catalog_backend(s: &str) -> Option<CatalogBackend> {
    CatalogBackend::from_str(s, true).ok()
}
