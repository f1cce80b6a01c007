//! Display values derived from catalog items.

use crate::catalog_store::ScoredBook;
use serde::Serialize;

pub const NO_QUERY_RESULTS: &str = "No books found. Try adjusting your search criteria.";
pub const NO_SIMILAR_RESULTS: &str = "No recommendations found for this book.";

const STAR_SCALE: usize = 5;

/// floor(rating) filled stars followed by empty ones up to five.
pub fn star_rating(rating: f64) -> String {
    let filled = if rating.is_finite() {
        rating.clamp(0.0, STAR_SCALE as f64).floor() as usize
    } else {
        0
    };
    let mut stars = "★".repeat(filled);
    stars.push_str(&"☆".repeat(STAR_SCALE - filled));
    stars
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// `round(score * 100)` followed by `%`.
pub fn format_percent(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}

/// Integer with comma thousands separators.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Badge text for the score a book carries.
pub fn score_badge(book: &ScoredBook) -> String {
    match book {
        ScoredBook::WithRelevance(b) => format!("{} Score", format_percent(b.relevance_score)),
        ScoredBook::WithSimilarity(b) => format!("{} Match", format_percent(b.similarity)),
        ScoredBook::WithSales(b) => format!("{} sold", group_thousands(b.sales)),
    }
}

/// Everything a result card shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookCard {
    pub badge: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub stars: String,
    pub rating: String,
    pub price: String,
}

impl From<&ScoredBook> for BookCard {
    fn from(book: &ScoredBook) -> Self {
        let item = book.item();
        BookCard {
            badge: score_badge(book),
            title: item.title.clone(),
            author: format!("by {}", item.author),
            genre: item.genre.label().to_string(),
            stars: star_rating(item.rating),
            rating: item.rating.to_string(),
            price: format_price(item.price),
        }
    }
}

/// A rendered result list. An empty list is shown as an explicit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ResultsView {
    Cards(Vec<BookCard>),
    Empty(&'static str),
}

pub fn render_results<T>(books: &[T], empty_message: &'static str) -> ResultsView
where
    T: Clone + Into<ScoredBook>,
{
    if books.is_empty() {
        return ResultsView::Empty(empty_message);
    }
    ResultsView::Cards(
        books
            .iter()
            .map(|b| BookCard::from(&b.clone().into()))
            .collect(),
    )
}
