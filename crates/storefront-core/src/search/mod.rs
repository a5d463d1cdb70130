//! Catalog search module.
//!
//! Query specification, filter stages, the query pipeline, pagination and
//! the URL parameter form.

pub mod engine;
mod filter;
mod params;
mod query;
mod results;

pub use engine::{query, Stage};
pub use filter::Filter;
pub use params::CatalogParams;
pub use query::{QuerySpec, SortOption, DEFAULT_PER_PAGE};
pub use results::{PageLink, Pagination, QueryResult, DEFAULT_VISIBLE_PAGES};
