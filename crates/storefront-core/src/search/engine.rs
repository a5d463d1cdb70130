//! The catalog query pipeline.
//!
//! A query runs as an ordered list of [`Stage`]s over borrowed products:
//! category, brand, price, search, then the sort stage, then pagination.
//! Products are only cloned for the final page.

use crate::catalog::{Product, TAG_NEW};
use crate::error::CommerceError;
use crate::search::{Filter, Pagination, QueryResult, QuerySpec, SortOption};

/// One step of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Keep only products matching the filter.
    Filter(Filter),
    /// Reorder, or for `Newest`, narrow to new arrivals.
    Sort(SortOption),
}

impl Stage {
    /// Stage name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Filter(filter) => filter.name(),
            Stage::Sort(_) => "sort",
        }
    }

    /// Apply the stage to the current selection.
    pub fn apply<'a>(&self, mut selected: Vec<&'a Product>) -> Vec<&'a Product> {
        match self {
            Stage::Filter(filter) => {
                selected.retain(|p| filter.matches(p));
                selected
            }
            Stage::Sort(sort) => sort_stage(*sort, selected),
        }
    }
}

fn sort_stage(sort: SortOption, mut selected: Vec<&Product>) -> Vec<&Product> {
    match sort {
        SortOption::Relevance => {}
        SortOption::Newest => selected.retain(|p| p.has_tag(TAG_NEW)),
        SortOption::PriceLow => selected.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceHigh => selected.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::Rating => selected.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    selected
}

/// Build the stage list for a query.
pub fn stages(spec: &QuerySpec) -> Vec<Stage> {
    spec.filters()
        .into_iter()
        .map(Stage::Filter)
        .chain(std::iter::once(Stage::Sort(spec.sort)))
        .collect()
}

/// Reject page and page-size values the pipeline cannot honor.
pub fn validate(spec: &QuerySpec) -> Result<(), CommerceError> {
    if spec.page < 1 {
        return Err(CommerceError::InvalidQuery(format!(
            "page must be at least 1, got {}",
            spec.page
        )));
    }
    if spec.per_page == 0 {
        return Err(CommerceError::InvalidQuery(
            "perPage must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Run a query against the full product collection.
///
/// Pages past the end return no products but still report the real
/// `total` and `total_pages`.
pub fn query(products: &[Product], spec: &QuerySpec) -> Result<QueryResult, CommerceError> {
    validate(spec)?;

    let mut selected: Vec<&Product> = products.iter().collect();
    for stage in stages(spec) {
        selected = stage.apply(selected);
        tracing::debug!(stage = stage.name(), remaining = selected.len(), "query stage applied");
    }

    let pagination = Pagination::new(spec.page, spec.per_page, selected.len());
    let page: Vec<Product> = selected
        .into_iter()
        .skip(pagination.offset())
        .take(spec.per_page as usize)
        .cloned()
        .collect();

    Ok(QueryResult::new(page, pagination))
}
