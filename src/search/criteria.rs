//! Search criteria entered in Query mode.

use crate::catalog_store::GenreFilter;

/// Highest value accepted by the minimum-rating field.
pub const MAX_RATING: f64 = 5.0;

/// User-specified filter over genre, author substring and minimum rating.
///
/// The default value restricts nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub genre: GenreFilter,
    /// Case-insensitive substring of the author name; blank means no filter.
    pub author: String,
    /// Inclusive lower bound; 0 means no filter.
    pub min_rating: f64,
}

impl Criteria {
    pub fn with_genre(mut self, genre: impl Into<GenreFilter>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    /// True when no filter is active.
    pub fn is_unrestricted(&self) -> bool {
        self.genre == GenreFilter::All && self.author.trim().is_empty() && !(self.min_rating > 0.0)
    }
}

/// Coerce the raw minimum-rating field into a filter value.
///
/// Empty, unparsable, negative and non-finite input all become 0 ("no
/// filter"); values above the scale are clamped to it.
pub fn parse_min_rating(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.min(MAX_RATING),
        _ => 0.0,
    }
}
