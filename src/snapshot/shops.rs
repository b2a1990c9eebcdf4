//! Shop table loader (`shops*.jsonl`)

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::TableLoader;
use crate::types::Shop;

/// Raw shop row as exported (zero-copy, borrowed strings)
#[derive(Deserialize)]
struct ShopRow<'a> {
    id: &'a str,
    name: &'a str,
    area: &'a str,
    latitude: f64,
    longitude: f64,
    created_at: &'a str,
}

/// Loader for the shops table
pub struct ShopTable;

impl TableLoader for ShopTable {
    type Row = Shop;

    fn table(&self) -> &str {
        "shops"
    }

    fn file_pattern(&self) -> &str {
        "shops*.jsonl"
    }

    fn row_id(row: &Shop) -> &str {
        &row.id
    }

    fn parse_line(&self, line: &mut [u8]) -> Option<Shop> {
        let row: ShopRow = match simd_json::from_slice(line) {
            Ok(row) => row,
            Err(e) => {
                eprintln!("[farmstand] Warning: skipping malformed shops row: {}", e);
                return None;
            }
        };

        let created_at = match DateTime::parse_from_rfc3339(row.created_at) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => {
                eprintln!(
                    "[farmstand] Warning: invalid timestamp '{}' in shops row {}, skipping",
                    row.created_at, row.id
                );
                return None;
            }
        };

        let shop = Shop {
            id: row.id.to_string(),
            name: row.name.to_string(),
            area: row.area.to_string(),
            latitude: row.latitude,
            longitude: row.longitude,
            created_at,
        };

        // Out-of-range coordinates never reach the distance ranking
        if let Err(e) = shop.validate() {
            eprintln!("[farmstand] Warning: skipping shops row: {}", e);
            return None;
        }

        Some(shop)
    }
}
