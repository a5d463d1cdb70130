//! JSON fixture loading.

use crate::DataError;
use serde::de::DeserializeOwned;
use std::path::Path;
use storefront_core::catalog::{Brand, Category, DealTimer, HeroBanner, Product, Review};

const PRODUCTS_JSON: &str = include_str!("../fixtures/products.json");
const CATEGORIES_JSON: &str = include_str!("../fixtures/categories.json");
const BRANDS_JSON: &str = include_str!("../fixtures/brands.json");
const REVIEWS_JSON: &str = include_str!("../fixtures/reviews.json");
const DEAL_TIMERS_JSON: &str = include_str!("../fixtures/dealTimers.json");
const HERO_BANNERS_JSON: &str = include_str!("../fixtures/heroBanners.json");

/// Fixture file names, relative to a fixture directory.
pub const FIXTURE_FILES: [&str; 6] = [
    "products.json",
    "categories.json",
    "brands.json",
    "reviews.json",
    "dealTimers.json",
    "heroBanners.json",
];

/// The full mock dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFixtures {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub reviews: Vec<Review>,
    pub deal_timers: Vec<DealTimer>,
    pub hero_banners: Vec<HeroBanner>,
}

impl CatalogFixtures {
    /// The dataset compiled into the binary.
    pub fn embedded() -> Result<Self, DataError> {
        Ok(Self {
            products: validated("products.json", decode("products.json", PRODUCTS_JSON)?)?,
            categories: decode("categories.json", CATEGORIES_JSON)?,
            brands: decode("brands.json", BRANDS_JSON)?,
            reviews: decode("reviews.json", REVIEWS_JSON)?,
            deal_timers: decode("dealTimers.json", DEAL_TIMERS_JSON)?,
            hero_banners: decode("heroBanners.json", HERO_BANNERS_JSON)?,
        })
    }

    /// Load from a directory. Files that are missing fall back to the
    /// embedded copy; files that exist must decode.
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        let dir = dir.as_ref();
        let (products, categories, brands, reviews, deal_timers, hero_banners) = futures::try_join!(
            read_products(dir),
            read_or_embedded(dir, "categories.json", CATEGORIES_JSON),
            read_or_embedded(dir, "brands.json", BRANDS_JSON),
            read_or_embedded(dir, "reviews.json", REVIEWS_JSON),
            read_or_embedded(dir, "dealTimers.json", DEAL_TIMERS_JSON),
            read_or_embedded(dir, "heroBanners.json", HERO_BANNERS_JSON),
        )?;

        tracing::debug!(
            dir = %dir.display(),
            products = products.len(),
            categories = categories.len(),
            brands = brands.len(),
            "loaded fixtures"
        );

        Ok(Self {
            products,
            categories,
            brands,
            reviews,
            deal_timers,
            hero_banners,
        })
    }
}

fn decode<T: DeserializeOwned>(fixture: &str, json: &str) -> Result<Vec<T>, DataError> {
    serde_json::from_str(json).map_err(|source| DataError::Decode {
        fixture: fixture.to_string(),
        source,
    })
}

/// Reject products whose fields are out of range.
fn validated(fixture: &str, products: Vec<Product>) -> Result<Vec<Product>, DataError> {
    for product in &products {
        product.validate().map_err(|source| DataError::Invalid {
            fixture: fixture.to_string(),
            source,
        })?;
    }
    Ok(products)
}

async fn read_products(dir: &Path) -> Result<Vec<Product>, DataError> {
    let products = read_or_embedded(dir, "products.json", PRODUCTS_JSON).await?;
    validated(&dir.join("products.json").display().to_string(), products)
}

async fn read_or_embedded<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
    embedded: &str,
) -> Result<Vec<T>, DataError> {
    let path = dir.join(file);
    match tokio::fs::read_to_string(&path).await {
        Ok(json) => decode(&path.display().to_string(), &json),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => decode(file, embedded),
        Err(source) => Err(DataError::Io { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_embedded_fixtures_decode() {
        let fixtures = CatalogFixtures::embedded().unwrap();
        assert!(fixtures.products.len() >= 12);
        assert!(!fixtures.categories.is_empty());
        assert!(!fixtures.brands.is_empty());
        assert!(!fixtures.reviews.is_empty());
        assert!(!fixtures.deal_timers.is_empty());
        assert!(!fixtures.hero_banners.is_empty());
    }

    #[test]
    fn test_embedded_fixtures_are_consistent() {
        let fixtures = CatalogFixtures::embedded().unwrap();
        assert!(fixtures.products.iter().all(|p| p.validate().is_ok()));

        let ids: HashSet<_> = fixtures.products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), fixtures.products.len());
        let slugs: HashSet<_> = fixtures.products.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs.len(), fixtures.products.len());

        let categories: HashSet<_> = fixtures.categories.iter().map(|c| &c.slug).collect();
        assert!(fixtures.products.iter().all(|p| categories.contains(&p.category_id)));
        assert!(fixtures.reviews.iter().all(|r| ids.contains(&r.product_id)));
    }

    #[tokio::test]
    async fn test_load_dir_overrides_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("products.json"),
            r#"[{"Id": 99, "slug": "solo", "title": "Solo", "price": 5, "categoryId": "misc", "inStock": true}]"#,
        )
        .unwrap();

        let fixtures = CatalogFixtures::load_dir(dir.path()).await.unwrap();
        assert_eq!(fixtures.products.len(), 1);
        assert_eq!(fixtures.products[0].stock_quantity, 10);
        assert_eq!(fixtures.categories, CatalogFixtures::embedded().unwrap().categories);
    }

    #[tokio::test]
    async fn test_load_dir_rejects_out_of_range_products() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("products.json"),
            r#"[{"Id": 0, "slug": "bad", "title": "Bad", "price": -5.0, "discountPercentage": 250,
                "rating": 9.5, "categoryId": "misc", "inStock": true}]"#,
        )
        .unwrap();

        let err = CatalogFixtures::load_dir(dir.path()).await.unwrap_err();
        assert!(matches!(err, DataError::Invalid { .. }));
        assert!(err.to_string().contains("products.json"));
    }

    #[tokio::test]
    async fn test_load_dir_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("brands.json"), "{not json").unwrap();
        let err = CatalogFixtures::load_dir(dir.path()).await.unwrap_err();
        assert!(matches!(err, DataError::Decode { .. }));
    }
}
