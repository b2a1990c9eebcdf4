//! Review table loader (`reviews*.jsonl`)

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::TableLoader;
use crate::types::Review;

/// Raw review row as exported (zero-copy, borrowed strings)
#[derive(Deserialize)]
struct ReviewRow<'a> {
    id: &'a str,
    shop_id: &'a str,
    rating: u8,
    comment: Option<String>,
    created_at: &'a str,
}

/// Loader for the reviews table
pub struct ReviewTable;

impl TableLoader for ReviewTable {
    type Row = Review;

    fn table(&self) -> &str {
        "reviews"
    }

    fn file_pattern(&self) -> &str {
        "reviews*.jsonl"
    }

    fn row_id(row: &Review) -> &str {
        &row.id
    }

    fn parse_line(&self, line: &mut [u8]) -> Option<Review> {
        let row: ReviewRow = match simd_json::from_slice(line) {
            Ok(row) => row,
            Err(e) => {
                eprintln!("[farmstand] Warning: skipping malformed reviews row: {}", e);
                return None;
            }
        };

        let created_at = match DateTime::parse_from_rfc3339(row.created_at) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => {
                eprintln!(
                    "[farmstand] Warning: invalid timestamp '{}' in reviews row {}, skipping",
                    row.created_at, row.id
                );
                return None;
            }
        };

        let review = Review {
            id: row.id.to_string(),
            shop_id: row.shop_id.to_string(),
            rating: row.rating,
            comment: row.comment,
            created_at,
        };

        if let Err(e) = review.validate() {
            eprintln!("[farmstand] Warning: skipping reviews row: {}", e);
            return None;
        }

        Some(review)
    }
}
