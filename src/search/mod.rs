mod criteria;
mod query_filter;

pub use criteria::{parse_min_rating, Criteria, MAX_RATING};
pub use query_filter::{search, QueryFilterEngine};
