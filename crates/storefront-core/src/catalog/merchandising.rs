//! Curated product selections for the homepage and listing shortcuts.
//!
//! These work on the full catalog the same way the query engine does: pure
//! selections, never mutating the input.

use crate::catalog::{Product, TAG_BESTSELLER, TAG_DEAL, TAG_NEW};
use crate::ids::CategoryId;

/// Best sellers shown per tab.
pub const BEST_SELLERS_LIMIT: usize = 10;
/// Deals shown on the homepage strip.
pub const DEALS_LIMIT: usize = 8;
/// New arrivals shown on the homepage strip.
pub const NEW_ARRIVALS_LIMIT: usize = 8;
/// Pseudo-category that disables the category filter for best sellers.
pub const OVERALL_CATEGORY: &str = "overall";

/// Products tagged "bestseller", highest rated first.
///
/// A `category` of `None` or [`OVERALL_CATEGORY`] spans the whole catalog.
pub fn best_sellers(products: &[Product], category: Option<&CategoryId>) -> Vec<Product> {
    let category = category.filter(|c| c.as_str() != OVERALL_CATEGORY && !c.is_blank());
    let mut selected: Vec<Product> = products
        .iter()
        .filter(|p| category.map_or(true, |c| &p.category_id == c))
        .filter(|p| p.has_tag(TAG_BESTSELLER))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    selected.truncate(BEST_SELLERS_LIMIT);
    selected
}

/// Products tagged "deal", biggest discount first.
pub fn deals(products: &[Product]) -> Vec<Product> {
    let mut selected: Vec<Product> = products
        .iter()
        .filter(|p| p.has_tag(TAG_DEAL))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.discount_percentage.cmp(&a.discount_percentage));
    selected.truncate(DEALS_LIMIT);
    selected
}

/// Products tagged "new", in catalog order.
pub fn new_arrivals(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.has_tag(TAG_NEW))
        .take(NEW_ARRIVALS_LIMIT)
        .cloned()
        .collect()
}

/// Quick search: case-insensitive substring of the title or of any tag.
///
/// This is looser than the query engine's search stage, which requires a
/// whole-tag match.
pub fn quick_search(products: &[Product], term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "a", "Alpha Lamp", Money::new(1000), "home")
                .with_tags(["bestseller"])
                .with_rating(4.1),
            Product::new(2, "b", "Beta Chair", Money::new(5000), "home")
                .with_tags(["bestseller", "deal"])
                .with_rating(4.8)
                .with_discount(Money::new(6000), 15),
            Product::new(3, "c", "Gamma Phone", Money::new(30000), "electronics")
                .with_tags(["bestseller", "new", "deal"])
                .with_rating(4.5)
                .with_discount(Money::new(40000), 25),
            Product::new(4, "d", "Delta Cable", Money::new(900), "electronics").with_tags(["new"]),
        ]
    }

    #[test]
    fn test_best_sellers_overall_and_by_category() {
        let all = best_sellers(&catalog(), None);
        assert_eq!(all.iter().map(|p| p.id.get()).collect::<Vec<_>>(), vec![2, 3, 1]);

        let overall = best_sellers(&catalog(), Some(&CategoryId::new(OVERALL_CATEGORY)));
        assert_eq!(overall.len(), 3);

        let home = best_sellers(&catalog(), Some(&CategoryId::new("home")));
        assert_eq!(home.iter().map(|p| p.id.get()).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_deals_sorted_by_discount() {
        let deals = deals(&catalog());
        assert_eq!(deals.iter().map(|p| p.id.get()).collect::<Vec<_>>(), vec![3, 2]);
    }

    #[test]
    fn test_new_arrivals_keep_catalog_order() {
        let arrivals = new_arrivals(&catalog());
        assert_eq!(arrivals.iter().map(|p| p.id.get()).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_quick_search_matches_tag_substring() {
        assert_eq!(quick_search(&catalog(), "best").len(), 3);
        assert_eq!(quick_search(&catalog(), "CHAIR")[0].id.get(), 2);
    }
}
