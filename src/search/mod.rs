pub mod filter;
pub mod types;

pub use filter::{filter, listing_order};
pub use types::{SearchCriteria, SearchResult};
