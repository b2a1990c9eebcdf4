//! Aggregation services: price board, shop ratings, catalog totals

use crate::services::normalizer::{display_name, group_key, normalize_product_name};
use crate::types::{CatalogStats, Category, PriceGroup, Product, RatingSummary, Review, Shop};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Running accumulator for one `(normalized name, category)` price group
struct PriceAccum {
    category: Category,
    total: Decimal,
    count: u64,
}

/// Aggregator for computing catalog reports
pub struct Aggregator;

impl Aggregator {
    /// Fold product listings into one price group per distinct
    /// `(normalized name, category)` pair, sorted ascending by display name
    /// (case-insensitive) with category as tie-break.
    ///
    /// The average is exact: `total / count` in `Decimal` arithmetic, with no
    /// rounding during accumulation. Rounding to 2 dp happens at presentation.
    pub fn price_groups(products: &[Product]) -> Vec<PriceGroup> {
        if products.is_empty() {
            return Vec::new();
        }

        // Ordered map keyed by (normalized name, category slug): normalized
        // names are all-lowercase, so key order is already the output order
        let mut groups: BTreeMap<(String, &'static str), PriceAccum> = BTreeMap::new();

        for product in products {
            let normalized = normalize_product_name(&product.name);
            let accum = groups
                .entry((normalized, product.category.slug()))
                .or_insert(PriceAccum {
                    category: product.category,
                    total: Decimal::ZERO,
                    count: 0,
                });
            accum.total += product.price;
            accum.count += 1;
        }

        groups
            .into_iter()
            .map(|((normalized, _), accum)| PriceGroup {
                display_name: display_name(&normalized),
                category: accum.category,
                average_price: accum.total / Decimal::from(accum.count),
                count: accum.count,
            })
            .collect()
    }

    /// Aggregate reviews into a per-shop rating summary. Shops without
    /// reviews are absent from the map.
    pub fn shop_ratings(reviews: &[Review]) -> HashMap<String, RatingSummary> {
        let mut sums: HashMap<String, (u64, u64)> = HashMap::new();

        for review in reviews {
            let entry = sums.entry(review.shop_id.clone()).or_insert((0, 0));
            entry.0 += u64::from(review.rating);
            entry.1 += 1;
        }

        sums.into_iter()
            .map(|(shop_id, (sum, count))| {
                (
                    shop_id,
                    RatingSummary {
                        average: sum as f64 / count as f64,
                        count,
                    },
                )
            })
            .collect()
    }

    /// Compute whole-catalog totals for the stats overview
    pub fn catalog_totals(
        shops: &[Shop],
        products: &[Product],
        reviews: &[Review],
    ) -> CatalogStats {
        let mut stats = CatalogStats {
            shop_count: shops.len() as u64,
            product_count: products.len() as u64,
            review_count: reviews.len() as u64,
            ..CatalogStats::default()
        };

        let mut distinct: HashSet<String> = HashSet::new();
        let mut price_total = Decimal::ZERO;

        for product in products {
            match product.category {
                Category::Fruit => stats.fruit_listings += 1,
                Category::Flower => stats.flower_listings += 1,
            }
            distinct.insert(group_key(&product.name, product.category));
            price_total += product.price;
        }

        stats.distinct_products = distinct.len() as u64;
        if !products.is_empty() {
            stats.average_listing_price = Some(price_total / Decimal::from(products.len() as u64));
        }

        stats
    }
}
