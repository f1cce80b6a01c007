//! Catalog models.
//!
//! A book is always carried together with exactly one provenance score:
//! bestsellers carry `sales`, similar books carry `similarity` and search
//! candidates carry `relevance_score`. The flat JSON shape of each record is
//! kept through `#[serde(flatten)]`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier of a catalog item.
pub type ItemId = u32;

/// Sentinel label shown in the genre selector meaning "no genre filter".
pub const ALL_GENRES_LABEL: &str = "All Genres";

// =============================================================================
// Enumerations
// =============================================================================

/// Closed set of genres a catalog item can belong to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Self-Help")]
    SelfHelp,
    Biography,
    Thriller,
    Mystery,
    Romance,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
}

impl Genre {
    /// All genres in selector order.
    pub const ALL: [Genre; 7] = [
        Genre::Fiction,
        Genre::SelfHelp,
        Genre::Biography,
        Genre::Thriller,
        Genre::Mystery,
        Genre::Romance,
        Genre::ScienceFiction,
    ];

    /// Convert from the display label, exact match only.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Fiction" => Some(Genre::Fiction),
            "Self-Help" => Some(Genre::SelfHelp),
            "Biography" => Some(Genre::Biography),
            "Thriller" => Some(Genre::Thriller),
            "Mystery" => Some(Genre::Mystery),
            "Romance" => Some(Genre::Romance),
            "Science Fiction" => Some(Genre::ScienceFiction),
            _ => None,
        }
    }

    /// Convert to the display label
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::SelfHelp => "Self-Help",
            Genre::Biography => "Biography",
            Genre::Thriller => "Thriller",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::ScienceFiction => "Science Fiction",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Genre selector value. `All` is only ever a filter input, never stored on items.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum GenreFilter {
    #[default]
    All,
    Only(Genre),
}

impl GenreFilter {
    /// Parse a selector label. The sentinel, the empty string and unknown
    /// labels all mean "no filter".
    pub fn from_label(s: &str) -> Self {
        match Genre::from_label(s.trim()) {
            Some(genre) => GenreFilter::Only(genre),
            None => GenreFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GenreFilter::All => ALL_GENRES_LABEL,
            GenreFilter::Only(genre) => genre.label(),
        }
    }

    /// The full selector: the sentinel first, then every genre.
    pub fn options() -> Vec<GenreFilter> {
        std::iter::once(GenreFilter::All)
            .chain(Genre::ALL.iter().copied().map(GenreFilter::Only))
            .collect()
    }

    pub fn matches(&self, genre: Genre) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(wanted) => *wanted == genre,
        }
    }
}

impl From<Genre> for GenreFilter {
    fn from(genre: Genre) -> Self {
        GenreFilter::Only(genre)
    }
}

// =============================================================================
// Items
// =============================================================================

/// Fields shared by every catalog record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    /// 0.0 to 5.0 inclusive
    pub rating: f64,
    pub price: f64,
}

impl CatalogItem {
    /// Selector label, "title by author".
    pub fn display_label(&self) -> String {
        format!("{} by {}", self.title, self.author)
    }

    /// Whether `title` names this item, ignoring case and surrounding
    /// whitespace. A blank title matches nothing.
    pub fn title_matches(&self, title: &str) -> bool {
        let wanted = title.trim();
        !wanted.is_empty() && self.title.trim().to_lowercase() == wanted.to_lowercase()
    }
}

/// Entry of the bestseller list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bestseller {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub sales: u64,
}

/// Entry of a precomputed related-items list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarBook {
    #[serde(flatten)]
    pub item: CatalogItem,
    /// 0.0 to 1.0
    pub similarity: f64,
}

/// Entry of the search candidate pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedBook {
    #[serde(flatten)]
    pub item: CatalogItem,
    /// 0.0 to 1.0, informational only
    pub relevance_score: f64,
}

/// A book decorated with whichever score its producer attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScoredBook {
    WithSales(Bestseller),
    WithSimilarity(SimilarBook),
    WithRelevance(RankedBook),
}

impl ScoredBook {
    pub fn item(&self) -> &CatalogItem {
        match self {
            ScoredBook::WithSales(b) => &b.item,
            ScoredBook::WithSimilarity(b) => &b.item,
            ScoredBook::WithRelevance(b) => &b.item,
        }
    }
}

impl From<Bestseller> for ScoredBook {
    fn from(b: Bestseller) -> Self {
        ScoredBook::WithSales(b)
    }
}

impl From<SimilarBook> for ScoredBook {
    fn from(b: SimilarBook) -> Self {
        ScoredBook::WithSimilarity(b)
    }
}

impl From<RankedBook> for ScoredBook {
    fn from(b: RankedBook) -> Self {
        ScoredBook::WithRelevance(b)
    }
}

/// The whole external data contract in one document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub bestsellers: Vec<Bestseller>,
    pub related_items: BTreeMap<ItemId, Vec<SimilarBook>>,
    pub candidates: Vec<RankedBook>,
}
