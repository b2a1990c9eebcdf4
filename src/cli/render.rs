//! Text and JSON rendering for the report subcommands
//!
//! Presentation rules live here, away from the aggregation services:
//! prices show 2 decimal places, distances under 1 km show in meters.
//! Stored values are never altered, only their rendering.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{CatalogStats, PriceGroup, RankedShop, RatingSummary};

/// JSON row for the shops report: shop fields plus derived annotations
#[derive(Serialize)]
struct ShopReport<'a> {
    id: &'a str,
    name: &'a str,
    area: &'a str,
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<RatingSummary>,
}

/// Price rounded to 2 dp for display
pub fn format_price(price: Decimal) -> String {
    format!("{:.2}", price)
}

/// Distance for display: meters under 1 km, kilometers otherwise.
/// Display-only; the stored value stays in kilometers.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{:.2} km", km)
    }
}

fn format_rating(summary: Option<&RatingSummary>) -> String {
    match summary {
        Some(s) => format!("{:.1} stars ({})", s.average, s.count),
        None => "no reviews".to_string(),
    }
}

/// Aligned text table for the average-price board
pub fn price_table(groups: &[PriceGroup]) -> String {
    if groups.is_empty() {
        return "No listings in snapshot.\n".to_string();
    }

    let name_w = groups
        .iter()
        .map(|g| g.display_name.len())
        .chain(["Product".len()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "{:<name_w$}  {:<8}  {:>10}  {:>8}\n",
        "Product", "Category", "Avg price", "Listings"
    ));
    for group in groups {
        out.push_str(&format!(
            "{:<name_w$}  {:<8}  {:>10}  {:>8}\n",
            group.display_name,
            group.category.slug(),
            format_price(group.average_price),
            group.count
        ));
    }
    out
}

/// Pretty JSON for the average-price board, with display rounding applied
pub fn prices_json(groups: &[PriceGroup]) -> anyhow::Result<String> {
    let rounded: Vec<PriceGroup> = groups
        .iter()
        .map(|g| PriceGroup {
            average_price: g.average_price.round_dp(2),
            ..g.clone()
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rounded)?)
}

/// Aligned text table for the shop directory
pub fn shop_table(shops: &[RankedShop], ratings: &HashMap<String, RatingSummary>) -> String {
    if shops.is_empty() {
        return "No shops in snapshot.\n".to_string();
    }

    let with_distance = shops.iter().any(|s| s.distance_km.is_some());
    let name_w = shops
        .iter()
        .map(|s| s.shop.name.len())
        .chain(["Shop".len()])
        .max()
        .unwrap_or(0);
    let area_w = shops
        .iter()
        .map(|s| s.shop.area.len())
        .chain(["Area".len()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    if with_distance {
        out.push_str(&format!(
            "{:<name_w$}  {:<area_w$}  {:>10}  {}\n",
            "Shop", "Area", "Distance", "Rating"
        ));
    } else {
        out.push_str(&format!("{:<name_w$}  {:<area_w$}  {}\n", "Shop", "Area", "Rating"));
    }

    for ranked in shops {
        let rating = format_rating(ratings.get(&ranked.shop.id));
        match ranked.distance_km {
            Some(km) => out.push_str(&format!(
                "{:<name_w$}  {:<area_w$}  {:>10}  {}\n",
                ranked.shop.name,
                ranked.shop.area,
                format_distance(km),
                rating
            )),
            None => out.push_str(&format!(
                "{:<name_w$}  {:<area_w$}  {}\n",
                ranked.shop.name, ranked.shop.area, rating
            )),
        }
    }
    out
}

/// Pretty JSON for the shop directory
pub fn shops_json(
    shops: &[RankedShop],
    ratings: &HashMap<String, RatingSummary>,
) -> anyhow::Result<String> {
    let reports: Vec<ShopReport> = shops
        .iter()
        .map(|ranked| ShopReport {
            id: &ranked.shop.id,
            name: &ranked.shop.name,
            area: &ranked.shop.area,
            latitude: ranked.shop.latitude,
            longitude: ranked.shop.longitude,
            distance_km: ranked.distance_km,
            rating: ratings.get(&ranked.shop.id).copied(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}

/// Text report for the catalog totals
pub fn stats_report(stats: &CatalogStats) -> String {
    let average = match stats.average_listing_price {
        Some(price) => format_price(price),
        None => "-".to_string(),
    };

    let mut out = String::new();
    out.push_str(&format!("Shops:             {}\n", stats.shop_count));
    out.push_str(&format!("Listings:          {}\n", stats.product_count));
    out.push_str(&format!("  fruit:           {}\n", stats.fruit_listings));
    out.push_str(&format!("  flower:          {}\n", stats.flower_listings));
    out.push_str(&format!("Distinct products: {}\n", stats.distinct_products));
    out.push_str(&format!("Reviews:           {}\n", stats.review_count));
    out.push_str(&format!("Avg listing price: {}\n", average));
    out
}

/// Pretty JSON for the catalog totals, with display rounding applied
pub fn stats_json(stats: &CatalogStats) -> anyhow::Result<String> {
    let rounded = CatalogStats {
        average_listing_price: stats.average_listing_price.map(|p| p.round_dp(2)),
        ..stats.clone()
    };
    Ok(serde_json::to_string_pretty(&rounded)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Shop};
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn make_ranked(id: &str, name: &str, distance_km: Option<f64>) -> RankedShop {
        RankedShop {
            shop: Shop {
                id: id.to_string(),
                name: name.to_string(),
                area: "Old Town".to_string(),
                latitude: 23.78,
                longitude: 90.4,
                created_at: ts(),
            },
            distance_km,
        }
    }

    // ========== formatting ==========

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(dec!(55)), "55.00");
        assert_eq!(format_price(dec!(30.5)), "30.50");
        assert_eq!(format_price(dec!(0.154)), "0.15");
    }

    #[test]
    fn test_format_distance_meters_under_one_km() {
        assert_eq!(format_distance(0.85), "850 m");
        assert_eq!(format_distance(0.9994), "999 m");
    }

    #[test]
    fn test_format_distance_kilometers_from_one_km() {
        assert_eq!(format_distance(1.0), "1.00 km");
        assert_eq!(format_distance(111.194), "111.19 km");
    }

    #[test]
    fn test_format_rating() {
        let summary = RatingSummary {
            average: 4.5,
            count: 12,
        };
        assert_eq!(format_rating(Some(&summary)), "4.5 stars (12)");
        assert_eq!(format_rating(None), "no reviews");
    }

    // ========== price board ==========

    #[test]
    fn test_price_table_empty() {
        assert_eq!(price_table(&[]), "No listings in snapshot.\n");
    }

    #[test]
    fn test_price_table_rows() {
        let groups = vec![PriceGroup {
            display_name: "Mango".to_string(),
            category: Category::Fruit,
            average_price: dec!(55),
            count: 2,
        }];

        let table = price_table(&groups);

        assert!(table.contains("Product"));
        assert!(table.contains("Mango"));
        assert!(table.contains("fruit"));
        assert!(table.contains("55.00"));
    }

    #[test]
    fn test_prices_json_rounds_average() {
        // A repeating average like 100/3 renders with 2 dp in reports
        let groups = vec![PriceGroup {
            display_name: "Mango".to_string(),
            category: Category::Fruit,
            average_price: dec!(100) / dec!(3),
            count: 3,
        }];

        let json = prices_json(&groups).unwrap();

        assert!(json.contains("\"33.33\""));
    }

    // ========== shop directory ==========

    #[test]
    fn test_shop_table_without_distances() {
        let shops = vec![make_ranked("s1", "Green Basket", None)];
        let table = shop_table(&shops, &HashMap::new());

        assert!(!table.contains("Distance"));
        assert!(table.contains("Green Basket"));
        assert!(table.contains("no reviews"));
    }

    #[test]
    fn test_shop_table_with_distances() {
        let shops = vec![make_ranked("s1", "Green Basket", Some(0.5))];
        let table = shop_table(&shops, &HashMap::new());

        assert!(table.contains("Distance"));
        assert!(table.contains("500 m"));
    }

    #[test]
    fn test_shops_json_omits_missing_annotations() {
        let shops = vec![make_ranked("s1", "Green Basket", None)];
        let json = shops_json(&shops, &HashMap::new()).unwrap();

        assert!(!json.contains("distance_km"));
        assert!(!json.contains("rating"));
    }

    #[test]
    fn test_shops_json_includes_annotations() {
        let shops = vec![make_ranked("s1", "Green Basket", Some(2.5))];
        let mut ratings = HashMap::new();
        ratings.insert(
            "s1".to_string(),
            RatingSummary {
                average: 4.0,
                count: 3,
            },
        );

        let json = shops_json(&shops, &ratings).unwrap();

        assert!(json.contains("\"distance_km\": 2.5"));
        assert!(json.contains("\"rating\""));
    }

    // ========== stats ==========

    #[test]
    fn test_stats_report_empty_catalog() {
        let report = stats_report(&CatalogStats::default());
        assert!(report.contains("Shops:             0"));
        assert!(report.contains("Avg listing price: -"));
    }

    #[test]
    fn test_stats_report_with_average() {
        let stats = CatalogStats {
            shop_count: 2,
            product_count: 3,
            average_listing_price: Some(dec!(46.5)),
            ..CatalogStats::default()
        };

        let report = stats_report(&stats);

        assert!(report.contains("Listings:          3"));
        assert!(report.contains("Avg listing price: 46.50"));
    }
}
