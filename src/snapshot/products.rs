//! Product table loader (`products*.jsonl`)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::TableLoader;
use crate::types::{Category, Product};

/// Raw product row as exported (zero-copy, borrowed strings)
#[derive(Deserialize)]
struct ProductRow<'a> {
    id: &'a str,
    shop_id: &'a str,
    name: &'a str,
    category: Category,
    /// Exported as a JSON string, parsed exactly
    price: Decimal,
    created_at: &'a str,
}

/// Loader for the products table
pub struct ProductTable;

impl TableLoader for ProductTable {
    type Row = Product;

    fn table(&self) -> &str {
        "products"
    }

    fn file_pattern(&self) -> &str {
        "products*.jsonl"
    }

    fn row_id(row: &Product) -> &str {
        &row.id
    }

    fn parse_line(&self, line: &mut [u8]) -> Option<Product> {
        let row: ProductRow = match simd_json::from_slice(line) {
            Ok(row) => row,
            Err(e) => {
                eprintln!("[farmstand] Warning: skipping malformed products row: {}", e);
                return None;
            }
        };

        let created_at = match DateTime::parse_from_rfc3339(row.created_at) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => {
                eprintln!(
                    "[farmstand] Warning: invalid timestamp '{}' in products row {}, skipping",
                    row.created_at, row.id
                );
                return None;
            }
        };

        let product = Product {
            id: row.id.to_string(),
            shop_id: row.shop_id.to_string(),
            name: row.name.to_string(),
            category: row.category,
            price: row.price,
            created_at,
        };

        if let Err(e) = product.validate() {
            eprintln!("[farmstand] Warning: skipping products row: {}", e);
            return None;
        }

        Some(product)
    }
}
