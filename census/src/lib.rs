//! Fetching, grouping and ordering of upstream people records.
//!
//! [`Fetcher`] walks a paginated collection and normalizes each entity into
//! a [`Record`]. [`categorize_and_sort`] groups records by category and
//! orders every group by attribute.

pub mod categorize;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod metrics_defs;
pub mod page_source;
pub mod types;

#[cfg(test)]
mod testutils;

pub use categorize::{categorize_and_sort, sort_by_attribute};
pub use errors::FetchError;
pub use fetcher::{FetchOutcome, Fetcher};
pub use types::{Attribute, CategorizedRecord, CategoryGroup, Record};
