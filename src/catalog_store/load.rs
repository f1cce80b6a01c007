//! Catalog loading functionality

use super::models::{CatalogData, ItemId};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Non-fatal issue found while checking a catalog document.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadCatalogProblem {
    DuplicateBestsellerId(ItemId),
    RatingOutOfRange { id: ItemId, rating: f64 },
    NegativePrice { id: ItemId, price: f64 },
    ScoreOutOfRange {
        id: ItemId,
        kind: &'static str,
        score: f64,
    },
    /// A related-items entry is keyed by an id that is not a bestseller.
    UnknownRelatedKey(ItemId),
    /// A related-items list is not ordered by descending similarity.
    RelatedNotSorted(ItemId),
}

fn check_item(
    problems: &mut Vec<LoadCatalogProblem>,
    id: ItemId,
    rating: f64,
    price: f64,
    score: (&'static str, f64),
) {
    if !(0.0..=5.0).contains(&rating) {
        problems.push(LoadCatalogProblem::RatingOutOfRange { id, rating });
    }
    if !(price >= 0.0) {
        problems.push(LoadCatalogProblem::NegativePrice { id, price });
    }
    let (kind, value) = score;
    if kind != "sales" && !(0.0..=1.0).contains(&value) {
        problems.push(LoadCatalogProblem::ScoreOutOfRange {
            id,
            kind,
            score: value,
        });
    }
}

/// Check a catalog document against the data contract.
pub fn validate_catalog(data: &CatalogData) -> Vec<LoadCatalogProblem> {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();

    for b in &data.bestsellers {
        if !seen.insert(b.item.id) {
            problems.push(LoadCatalogProblem::DuplicateBestsellerId(b.item.id));
        }
        check_item(
            &mut problems,
            b.item.id,
            b.item.rating,
            b.item.price,
            ("sales", b.sales as f64),
        );
    }

    for (key, related) in &data.related_items {
        if !seen.contains(key) {
            problems.push(LoadCatalogProblem::UnknownRelatedKey(*key));
        }
        for s in related {
            check_item(
                &mut problems,
                s.item.id,
                s.item.rating,
                s.item.price,
                ("similarity", s.similarity),
            );
        }
        if related
            .windows(2)
            .any(|pair| pair[0].similarity < pair[1].similarity)
        {
            problems.push(LoadCatalogProblem::RelatedNotSorted(*key));
        }
    }

    for c in &data.candidates {
        check_item(
            &mut problems,
            c.item.id,
            c.item.rating,
            c.item.price,
            ("relevance_score", c.relevance_score),
        );
    }

    problems
}

/// Parse a catalog document, logging any contract problems found in it.
///
/// Only a malformed document is an error; problems are reported and the
/// catalog is still returned.
pub fn parse_catalog_json(text: &str) -> Result<CatalogData> {
    let data: CatalogData =
        serde_json::from_str(text).context("Failed to parse catalog document")?;

    #[cfg(not(feature = "no_checks"))]
    {
        let problems = validate_catalog(&data);
        if problems.is_empty() {
            info!("Catalog checked, no issues found.");
        } else {
            warn!(
                "Catalog was built, but has {} non-fatal issues:",
                problems.len()
            );
            for problem in problems.iter() {
                warn!("- {:?}", problem);
            }
        }
    }

    info!(
        "Catalog has: {} bestsellers, {} related-items entries, {} search candidates",
        data.bestsellers.len(),
        data.related_items.len(),
        data.candidates.len()
    );
    Ok(data)
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogData> {
    let path = path.as_ref();
    info!("Loading catalog from {:?}...", path);
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
    parse_catalog_json(&text).with_context(|| format!("Invalid catalog file: {:?}", path))
}
