//! Snapshot loading: JSONL exports of the marketplace store tables

mod products;
mod reviews;
mod shops;

pub use products::ProductTable;
pub use reviews::ReviewTable;
pub use shops::ShopTable;

use crate::types::{FarmstandError, Product, Result, Review, Shop};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One exported table of a snapshot: a part-file pattern plus row parsing
pub trait TableLoader: Send + Sync {
    type Row: Send;

    /// Table name, used in warnings (e.g. "products")
    fn table(&self) -> &str;

    /// Glob pattern matching the table's part files (e.g. "products*.jsonl")
    fn file_pattern(&self) -> &str;

    /// Row id used for first-occurrence dedup across part files
    fn row_id(row: &Self::Row) -> &str;

    /// Parse a single JSONL line (zero-copy with borrowed strings).
    /// Returns `None` for malformed or invalid rows, which are skipped with
    /// a warning so one bad export line never poisons a report.
    fn parse_line(&self, line: &mut [u8]) -> Option<Self::Row>;

    /// Collect the table's part files under `dir`, sorted so dedup order is
    /// deterministic
    fn collect_files(&self, dir: &Path) -> Vec<PathBuf> {
        let pattern = dir.join(self.file_pattern());
        let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
            .map(|paths| paths.filter_map(|e| e.ok()).collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    /// Parse one part file, lines in parallel
    fn parse_file(&self, path: &Path) -> Result<Vec<Self::Row>> {
        let content = fs::read_to_string(path)?;

        let rows: Vec<Self::Row> = content
            .par_lines()
            .filter_map(|line| {
                if line.is_empty() {
                    return None;
                }
                // simd-json needs a mutable buffer
                let mut bytes = line.as_bytes().to_vec();
                self.parse_line(&mut bytes)
            })
            .collect();

        Ok(rows)
    }

    /// Load every part file of the table. Duplicate row ids across part
    /// files are dropped, first occurrence wins. No matching files at all
    /// yields an empty table, not an error.
    fn load(&self, dir: &Path) -> Result<Vec<Self::Row>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut rows: Vec<Self::Row> = Vec::new();

        for file in self.collect_files(dir) {
            let parsed = match self.parse_file(&file) {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!(
                        "[farmstand] Warning: failed to read {} part file {:?}: {}",
                        self.table(),
                        file,
                        e
                    );
                    continue;
                }
            };

            for row in parsed {
                if seen.insert(Self::row_id(&row).to_string()) {
                    rows.push(row);
                }
            }
        }

        Ok(rows)
    }
}

/// A fully materialized snapshot: every table loaded into memory.
/// Recomputed reports always start from the latest loaded snapshot; nothing
/// derived is persisted or cached across invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub shops: Vec<Shop>,
    pub products: Vec<Product>,
    pub reviews: Vec<Review>,
}

/// Loads marketplace snapshots from a directory of JSONL table exports
pub struct SnapshotLoader {
    snapshot_dir: PathBuf,
}

impl SnapshotLoader {
    /// Create a loader pointed at the default snapshot directory
    /// (~/.farmstand/snapshot)
    pub fn new() -> Self {
        let home = directories::BaseDirs::new()
            .map(|d| d.home_dir().to_path_buf())
            .unwrap_or_else(|| {
                eprintln!("[farmstand] Warning: Could not determine home directory");
                PathBuf::from(".")
            });
        Self {
            snapshot_dir: home.join(".farmstand").join("snapshot"),
        }
    }

    /// Create a loader for a specific snapshot directory
    pub fn with_snapshot_dir(snapshot_dir: PathBuf) -> Self {
        Self { snapshot_dir }
    }

    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    /// Load all tables. A missing table file yields an empty table; a
    /// missing snapshot directory is an error.
    pub fn load(&self) -> Result<Snapshot> {
        if !self.snapshot_dir.is_dir() {
            return Err(FarmstandError::Snapshot(format!(
                "snapshot directory {:?} does not exist",
                self.snapshot_dir
            )));
        }

        Ok(Snapshot {
            shops: ShopTable.load(&self.snapshot_dir)?,
            products: ProductTable.load(&self.snapshot_dir)?,
            reviews: ReviewTable.load(&self.snapshot_dir)?,
        })
    }
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self::new()
    }
}
