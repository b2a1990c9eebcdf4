//! Command-line interface: prices, shops, and stats reports

mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::services::{distance, Aggregator};
use crate::snapshot::{Snapshot, SnapshotLoader};
use crate::types::{Category, Coordinates};

/// Local market directory: compare produce & flower prices and find nearby shops
#[derive(Parser)]
#[command(name = "farmstand")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Snapshot directory (defaults to ~/.farmstand/snapshot)
    #[arg(long, value_name = "DIR", global = true)]
    snapshot_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the average-price board per product
    Prices {
        /// Restrict to one category (fruit or flower)
        #[arg(long)]
        category: Option<Category>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List shops with ratings, nearest first when a location is given
    Shops {
        /// Buyer location as "LAT,LNG" in decimal degrees
        #[arg(long, value_name = "LAT,LNG")]
        near: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show catalog totals (default)
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let loader = match self.snapshot_dir {
            Some(dir) => SnapshotLoader::with_snapshot_dir(dir),
            None => SnapshotLoader::new(),
        };
        let snapshot = loader
            .load()
            .with_context(|| format!("failed to load snapshot from {:?}", loader.snapshot_dir()))?;

        match self.command {
            Some(Commands::Prices { category, json }) => run_prices(&snapshot, category, json),
            Some(Commands::Shops { near, json }) => run_shops(&snapshot, near.as_deref(), json),
            Some(Commands::Stats { json }) => run_stats(&snapshot, json),
            None => run_stats(&snapshot, false),
        }
    }
}

fn run_prices(snapshot: &Snapshot, category: Option<Category>, json: bool) -> anyhow::Result<()> {
    let mut groups = Aggregator::price_groups(&snapshot.products);
    if let Some(category) = category {
        groups.retain(|g| g.category == category);
    }

    if json {
        println!("{}", render::prices_json(&groups)?);
    } else {
        print!("{}", render::price_table(&groups));
    }
    Ok(())
}

fn run_shops(snapshot: &Snapshot, near: Option<&str>, json: bool) -> anyhow::Result<()> {
    let buyer = near.map(parse_near).transpose()?;
    let ranked = distance::rank_shops(&snapshot.shops, buyer);
    let ratings = Aggregator::shop_ratings(&snapshot.reviews);

    if json {
        println!("{}", render::shops_json(&ranked, &ratings)?);
    } else {
        print!("{}", render::shop_table(&ranked, &ratings));
    }
    Ok(())
}

fn run_stats(snapshot: &Snapshot, json: bool) -> anyhow::Result<()> {
    let stats = Aggregator::catalog_totals(&snapshot.shops, &snapshot.products, &snapshot.reviews);

    if json {
        println!("{}", render::stats_json(&stats)?);
    } else {
        print!("{}", render::stats_report(&stats));
    }
    Ok(())
}

/// Parse a buyer location given as "LAT,LNG" in decimal degrees
fn parse_near(raw: &str) -> anyhow::Result<Coordinates> {
    let (lat_raw, lng_raw) = raw
        .split_once(',')
        .with_context(|| format!("expected \"LAT,LNG\", got '{}'", raw))?;

    let lat: f64 = lat_raw
        .trim()
        .parse()
        .with_context(|| format!("invalid latitude '{}'", lat_raw.trim()))?;
    let lng: f64 = lng_raw
        .trim()
        .parse()
        .with_context(|| format!("invalid longitude '{}'", lng_raw.trim()))?;

    if !(-90.0..=90.0).contains(&lat) {
        anyhow::bail!("latitude {} out of range [-90, 90]", lat);
    }
    if !(-180.0..=180.0).contains(&lng) {
        anyhow::bail!("longitude {} out of range [-180, 180]", lng);
    }

    Ok(Coordinates { lat, lng })
}
