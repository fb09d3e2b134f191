//! Game catalog data model and the filter/sort evaluator.
//!
//! This crate defines the domain types for the discovery catalog without any
//! network or UI dependencies. Consumers use these types directly for
//! serialization, display, or passing to `indiegrid-feed` for pagination.

pub mod filter;
pub mod types;

pub use filter::{apply_filters, FilterSpec, FilterSpecError, SortKey, TimeFrame};
pub use types::*;
