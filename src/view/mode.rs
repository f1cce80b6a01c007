use serde::Serialize;

/// The three mutually exclusive view modes. Any mode can be entered from any
/// other.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Query,
    Similar,
    Analysis,
}

impl Default for ViewMode {
    fn default() -> Self {
        Self::Query
    }
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Query, ViewMode::Similar, ViewMode::Analysis];

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Query => "Search by Criteria",
            ViewMode::Similar => "Find Similar Books",
            ViewMode::Analysis => "Bestseller Analysis",
        }
    }
}
