//! Mock catalog services for the storefront.
//!
//! This crate provides:
//! - `CatalogSource` - Async catalog access seam
//! - `MockCatalog` - Fixture-backed implementation with simulated latency
//! - `CatalogFixtures` - Embedded or on-disk JSON datasets
//! - `Latency` - Per-call delay policy

mod error;
mod fixtures;
mod latency;
mod mock;
mod source;

pub use error::DataError;
pub use fixtures::{CatalogFixtures, FIXTURE_FILES};
pub use latency::{Latency, ServiceCall};
pub use mock::{MockCatalog, RECOMMENDED_LIMIT};
pub use source::{CatalogSource, FilterOptions, HelpfulVote};
