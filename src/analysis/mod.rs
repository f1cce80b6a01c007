//! Content of the Analysis mode.
//!
//! The mode only shows placeholder panels; `summarize_bestsellers` provides
//! the aggregate counts those panels would eventually chart.

use crate::catalog_store::Bestseller;
use serde::Serialize;
use std::collections::HashMap;

pub const PLACEHOLDER_CAPTION: &str = "Visualization Coming Soon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisPanel {
    GenreDistribution,
    SalesTrends,
    RatingAnalysis,
    PriceComparison,
}

impl AnalysisPanel {
    pub const ALL: [AnalysisPanel; 4] = [
        AnalysisPanel::GenreDistribution,
        AnalysisPanel::SalesTrends,
        AnalysisPanel::RatingAnalysis,
        AnalysisPanel::PriceComparison,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AnalysisPanel::GenreDistribution => "Genre Distribution Chart",
            AnalysisPanel::SalesTrends => "Sales Trends Chart",
            AnalysisPanel::RatingAnalysis => "Rating Analysis Chart",
            AnalysisPanel::PriceComparison => "Price Comparison Chart",
        }
    }

    pub fn caption(&self) -> &'static str {
        PLACEHOLDER_CAPTION
    }
}

/// A label with how many bestsellers carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub top_genres: Vec<LabelCount>,
    pub top_authors: Vec<LabelCount>,
    pub rating_distribution: Vec<f64>,
    pub total_sales: u64,
}

/// Count labels, most frequent first, ties broken by label.
fn top_counts<'a>(labels: impl Iterator<Item = &'a str>, top_n: usize) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    let mut counts: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    counts.truncate(top_n);
    counts
}

pub fn summarize_bestsellers(bestsellers: &[Bestseller], top_n: usize) -> AnalysisSummary {
    AnalysisSummary {
        top_genres: top_counts(bestsellers.iter().map(|b| b.item.genre.label()), top_n),
        top_authors: top_counts(bestsellers.iter().map(|b| b.item.author.as_str()), top_n),
        rating_distribution: bestsellers.iter().map(|b| b.item.rating).collect(),
        total_sales: bestsellers.iter().map(|b| b.sales).sum(),
    }
}

/// What the Analysis mode shows: the placeholder panels plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOverview {
    pub panels: Vec<AnalysisPanel>,
    pub summary: AnalysisSummary,
}
