//! Query parameters and the pure pipeline that turns a collection snapshot
//! into the page the user sees.
//!
//! Stages run in a fixed order: search, filters, sort, paginate.

pub mod filtering;
pub mod pagination;
pub mod pipeline;
pub mod sorting;
pub mod types;

pub use pipeline::{DerivedView, count_matches, derive_view};
pub use sorting::{compare_games, compare_titles, sort_games};
pub use types::{ALL_SENTINEL, DEFAULT_PAGE_SIZE, Filter, QueryParams, SortKey, UnknownSortKey};
