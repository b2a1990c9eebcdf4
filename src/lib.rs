//! farmstand: local-market directory reports
//!
//! Loads a JSONL snapshot of a marketplace catalog (shops, product listings,
//! reviews), aggregates average prices per normalized product name, and
//! ranks shops by distance from a buyer coordinate.

pub mod cli;
pub mod services;
pub mod snapshot;
pub mod types;
