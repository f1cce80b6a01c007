use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// Catalog document or database; the reference catalog is used when absent.
    pub catalog_path: Option<String>,
    /// Catalog backend: "reference", "json", "sqlite"
    pub catalog_backend: Option<String>,
    /// Default tracing level, overridden by the LOG_LEVEL env var.
    pub log_level: Option<String>,

    // Feature configs
    pub session: Option<SessionConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SessionConfig {
    pub initial_load_delay_ms: Option<u64>,
    pub selection_fetch_delay_ms: Option<u64>,
    pub search_delay_ms: Option<u64>,
    /// "query", "similar" or "analysis"
    pub initial_mode: Option<String>,
    pub analysis_top_n: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
