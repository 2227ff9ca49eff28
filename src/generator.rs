//! Sample data generation.
//!
//! Builds the full cross product of a catalog and a year range. Rows are
//! nested years-outer, catalog-order-inner: every year contributes one row per
//! product, in catalog order, before the next year starts. Sales values are
//! drawn from a seeded `StdRng` in that same row order, so a seed fully
//! determines the dataset.

use crate::catalog::{Catalog, YearRange};
use crate::data::{SalesRecord, SalesTable};
use rand::prelude::*;

/// Half-open range `[low, high)` sales values are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesRange {
    pub low: u32,
    pub high: u32,
}

impl SalesRange {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.low && value < self.high
    }
}

impl Default for SalesRange {
    fn default() -> Self {
        Self { low: 100, high: 1000 }
    }
}

/// Pick the seed for a session: the configured one, or a fresh one from entropy
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => s,
        None => StdRng::from_entropy().gen(),
    }
}

/// Generate one row per (year, product) pair with uniformly random sales
pub fn generate(catalog: &Catalog, years: YearRange, sales: SalesRange, seed: u64) -> SalesTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(catalog.len() * years.len());

    for year in years.years() {
        for entry in catalog.entries() {
            let value = rng.gen_range(sales.low..sales.high);
            rows.push(SalesRecord::new(year, &entry.product, &entry.category, value));
        }
    }

    tracing::debug!(seed, rows = rows.len(), "generated sample dataset");
    SalesTable::new(rows)
}
