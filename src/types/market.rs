//! Market domain types: catalog rows and derived report structures

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{FarmstandError, Result};

/// Product category as stored in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fruit,
    Flower,
}

impl Category {
    /// Stable lowercase identifier, also the category half of a group key
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Fruit => "fruit",
            Category::Flower => "flower",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Category {
    type Err = FarmstandError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fruit" => Ok(Category::Fruit),
            "flower" => Ok(Category::Flower),
            other => Err(FarmstandError::Parse(format!(
                "unknown category '{}', expected fruit or flower",
                other
            ))),
        }
    }
}

/// A point on Earth in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A product listing row from the catalog snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub shop_id: String,
    pub name: String,
    pub category: Category,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Check the row invariants the data-entry layer enforces before insert.
    /// Must hold for every row handed to the aggregation components.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(FarmstandError::InvalidRow("product id is empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(FarmstandError::InvalidRow(format!(
                "product {} has an empty name",
                self.id
            )));
        }
        if self.price <= Decimal::ZERO {
            return Err(FarmstandError::InvalidRow(format!(
                "product {} price {} is not positive",
                self.id, self.price
            )));
        }
        Ok(())
    }
}

/// A shop row from the catalog snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    /// Free-text locality, display only
    pub area: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl Shop {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.latitude,
            lng: self.longitude,
        }
    }

    /// Check the row invariants the data-entry layer enforces before insert.
    /// Coordinates outside the valid degree ranges (or NaN) are rejected here
    /// so the distance ranking never sees them.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(FarmstandError::InvalidRow("shop id is empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(FarmstandError::InvalidRow(format!(
                "shop {} has an empty name",
                self.id
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(FarmstandError::InvalidRow(format!(
                "shop {} latitude {} out of range [-90, 90]",
                self.id, self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(FarmstandError::InvalidRow(format!(
                "shop {} longitude {} out of range [-180, 180]",
                self.id, self.longitude
            )));
        }
        Ok(())
    }
}

/// A rating/review row left by a buyer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub shop_id: String,
    /// Star rating, 1 to 5
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Check the row invariants the data-entry layer enforces before insert.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(FarmstandError::InvalidRow("review id is empty".into()));
        }
        if self.shop_id.is_empty() {
            return Err(FarmstandError::InvalidRow(format!(
                "review {} has an empty shop id",
                self.id
            )));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(FarmstandError::InvalidRow(format!(
                "review {} rating {} out of range 1..=5",
                self.id, self.rating
            )));
        }
        Ok(())
    }
}

/// One aggregated price entry: a normalized product name within a category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceGroup {
    /// Normalized name with only its first character upper-cased
    pub display_name: String,
    pub category: Category,
    /// Exact `total / count`; rounded to 2 dp only at presentation
    pub average_price: Decimal,
    /// Number of listings folded into the average, across shops
    pub count: u64,
}

/// A shop annotated with its distance from the buyer, when one is known
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedShop {
    pub shop: Shop,
    /// Always kilometers; `None` when no buyer coordinate was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Accumulated ratings for a single shop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u64,
}

/// Whole-catalog totals for the stats overview
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CatalogStats {
    pub shop_count: u64,
    pub product_count: u64,
    pub review_count: u64,
    pub fruit_listings: u64,
    pub flower_listings: u64,
    /// Distinct `(normalized name, category)` pairs across all listings
    pub distinct_products: u64,
    /// Mean listing price across the whole catalog, `None` when empty
    pub average_listing_price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn make_product(id: &str, name: &str, category: Category, price: Decimal) -> Product {
        Product {
            id: id.to_string(),
            shop_id: "shop-1".to_string(),
            name: name.to_string(),
            category,
            price,
            created_at: ts(),
        }
    }

    fn make_shop(id: &str, lat: f64, lng: f64) -> Shop {
        Shop {
            id: id.to_string(),
            name: "Corner Stall".to_string(),
            area: "Old Town".to_string(),
            latitude: lat,
            longitude: lng,
            created_at: ts(),
        }
    }

    fn make_review(id: &str, rating: u8) -> Review {
        Review {
            id: id.to_string(),
            shop_id: "shop-1".to_string(),
            rating,
            comment: None,
            created_at: ts(),
        }
    }

    // ========== Category ==========

    #[test]
    fn test_category_slug() {
        assert_eq!(Category::Fruit.slug(), "fruit");
        assert_eq!(Category::Flower.slug(), "flower");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("fruit".parse::<Category>().unwrap(), Category::Fruit);
        assert_eq!("flower".parse::<Category>().unwrap(), Category::Flower);
        assert!("vegetable".parse::<Category>().is_err());
        assert!("Fruit".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Fruit).unwrap(), "\"fruit\"");
        let parsed: Category = serde_json::from_str("\"flower\"").unwrap();
        assert_eq!(parsed, Category::Flower);
    }

    // ========== Product validation ==========

    #[test]
    fn test_product_valid() {
        let p = make_product("p1", "Mango", Category::Fruit, dec!(50));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_product_zero_price_rejected() {
        let p = make_product("p1", "Mango", Category::Fruit, dec!(0));
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_product_negative_price_rejected() {
        let p = make_product("p1", "Mango", Category::Fruit, dec!(-3.50));
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_product_blank_name_rejected() {
        let p = make_product("p1", "   ", Category::Fruit, dec!(50));
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_product_empty_id_rejected() {
        let p = make_product("", "Mango", Category::Fruit, dec!(50));
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_product_price_roundtrips_as_string() {
        let p = make_product("p1", "Mango", Category::Fruit, dec!(49.99));
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"49.99\""));
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, dec!(49.99));
    }

    // ========== Shop validation ==========

    #[test]
    fn test_shop_valid_and_coordinates() {
        let s = make_shop("s1", 23.81, 90.41);
        assert!(s.validate().is_ok());
        let c = s.coordinates();
        assert_eq!(c.lat, 23.81);
        assert_eq!(c.lng, 90.41);
    }

    #[test]
    fn test_shop_latitude_out_of_range() {
        assert!(make_shop("s1", 90.01, 0.0).validate().is_err());
        assert!(make_shop("s1", -90.01, 0.0).validate().is_err());
    }

    #[test]
    fn test_shop_longitude_out_of_range() {
        assert!(make_shop("s1", 0.0, 180.5).validate().is_err());
        assert!(make_shop("s1", 0.0, -181.0).validate().is_err());
    }

    #[test]
    fn test_shop_boundary_coordinates_accepted() {
        assert!(make_shop("s1", 90.0, 180.0).validate().is_ok());
        assert!(make_shop("s1", -90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_shop_nan_coordinates_rejected() {
        assert!(make_shop("s1", f64::NAN, 0.0).validate().is_err());
        assert!(make_shop("s1", 0.0, f64::NAN).validate().is_err());
    }

    // ========== Review validation ==========

    #[test]
    fn test_review_ratings_in_range() {
        assert!(make_review("r1", 1).validate().is_ok());
        assert!(make_review("r1", 5).validate().is_ok());
    }

    #[test]
    fn test_review_ratings_out_of_range() {
        assert!(make_review("r1", 0).validate().is_err());
        assert!(make_review("r1", 6).validate().is_err());
    }

    #[test]
    fn test_review_empty_shop_id_rejected() {
        let mut r = make_review("r1", 4);
        r.shop_id = String::new();
        assert!(r.validate().is_err());
    }

    // ========== RankedShop serialization ==========

    #[test]
    fn test_ranked_shop_omits_missing_distance() {
        let ranked = RankedShop {
            shop: make_shop("s1", 0.0, 0.0),
            distance_km: None,
        };
        let json = serde_json::to_string(&ranked).unwrap();
        assert!(!json.contains("distance_km"));
    }

    #[test]
    fn test_ranked_shop_includes_present_distance() {
        let ranked = RankedShop {
            shop: make_shop("s1", 0.0, 0.0),
            distance_km: Some(12.5),
        };
        let json = serde_json::to_string(&ranked).unwrap();
        assert!(json.contains("\"distance_km\":12.5"));
    }
}
