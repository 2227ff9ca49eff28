//! Session-scoped dashboard context.
//!
//! A [`Session`] owns the dataset generated at start-up and hands out
//! read-only views of it. Each user interaction becomes one call to
//! [`Session::view`], which filters and aggregates from scratch.

use crate::aggregate::{bar_totals, line_totals, ProductTotal, YearTotal};
use crate::catalog::{Catalog, YearRange};
use crate::data::SalesTable;
use crate::filter::{apply_filter, FilterConfig};
use crate::generator::{generate, resolve_seed, SalesRange};
use serde::Serialize;
use thiserror::Error;

/// Minimum sales threshold preselected on the controls
pub const DEFAULT_MIN_SALES: u32 = 200;
/// Number of rows shown unless the user asks for more
pub const DEFAULT_LIMIT: usize = 5;

/// Rejected control input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("year {year} is not in the dataset (available: {available})")]
    UnknownYear { year: i32, available: String },
    #[error("unknown product type '{0}'")]
    UnknownCategory(String),
    #[error("number of products must be between 1 and {max}, got {got}")]
    LimitOutOfRange { got: usize, max: usize },
}

/// Values the presentation layer needs to build its filter widgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub years: Vec<i32>,
    pub categories: Vec<String>,
    pub max_limit: usize,
}

impl Controls {
    /// Filter settings the dashboard opens with
    pub fn defaults(&self) -> FilterConfig {
        FilterConfig::new(
            self.years.first().copied().unwrap_or_default(),
            DEFAULT_MIN_SALES,
            self.categories.iter().cloned(),
            DEFAULT_LIMIT.min(self.max_limit),
        )
    }

    /// Check raw user input against the dataset and build a filter.
    ///
    /// `None` for year or categories selects the default (first year, every
    /// category).
    pub fn validate(
        &self,
        year: Option<i32>,
        min_sales: u32,
        categories: Option<&[String]>,
        limit: usize,
    ) -> Result<FilterConfig, ControlError> {
        let defaults = self.defaults();

        let year = match year {
            Some(y) if self.years.contains(&y) => y,
            Some(y) => {
                let available: Vec<String> = self.years.iter().map(|y| y.to_string()).collect();
                return Err(ControlError::UnknownYear {
                    year: y,
                    available: available.join(", "),
                });
            }
            None => defaults.year,
        };

        let categories = match categories {
            Some(selected) => {
                for category in selected {
                    if !self.categories.contains(category) {
                        return Err(ControlError::UnknownCategory(category.clone()));
                    }
                }
                selected.iter().cloned().collect()
            }
            None => defaults.categories,
        };

        if limit == 0 || limit > self.max_limit {
            return Err(ControlError::LimitOutOfRange {
                got: limit,
                max: self.max_limit,
            });
        }

        Ok(FilterConfig {
            year,
            min_sales,
            categories,
            limit,
        })
    }
}

/// Everything one recomputation pass produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub rows: SalesTable,
    pub bar: Vec<ProductTotal>,
    pub line: Vec<YearTotal>,
}

/// Dataset and its provenance for one user session
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    seed: Option<u64>,
    data: SalesTable,
}

impl Session {
    /// Generate the session dataset. Without a seed one is drawn and logged.
    pub fn start(catalog: Catalog, years: YearRange, sales: SalesRange, seed: Option<u64>) -> Self {
        let seed = resolve_seed(seed);
        let data = generate(&catalog, years, sales, seed);
        tracing::info!(
            seed,
            products = catalog.len(),
            years = years.len(),
            rows = data.len(),
            "session started"
        );
        Self {
            catalog,
            seed: Some(seed),
            data,
        }
    }

    /// Session over an existing table; it has no generation seed
    pub fn from_table(catalog: Catalog, data: SalesTable) -> Self {
        Self {
            catalog,
            seed: None,
            data,
        }
    }

    /// Seed the dataset was generated from, if it was generated
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn data(&self) -> &SalesTable {
        &self.data
    }

    pub fn controls(&self) -> Controls {
        Controls {
            years: self.data.years(),
            categories: self.data.categories(),
            max_limit: self.catalog.len(),
        }
    }

    /// Filter, then compute both chart series
    pub fn view(&self, config: &FilterConfig) -> DashboardView {
        let rows = apply_filter(&self.data, config);
        let bar = bar_totals(&rows);
        let line = line_totals(&self.data, &rows);
        tracing::debug!(
            year = config.year,
            min_sales = config.min_sales,
            limit = config.limit,
            rows = rows.len(),
            products = bar.len(),
            "recomputed view"
        );
        DashboardView { rows, bar, line }
    }
}
