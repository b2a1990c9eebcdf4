//! Services for catalog aggregation and ranking

pub mod aggregator;
pub mod distance;
pub mod normalizer;

pub use aggregator::Aggregator;
pub use distance::{haversine_km, rank_shops};
pub use normalizer::{display_name, group_key, normalize_product_name};
