// Filter engine: year, minimum sales and category predicates plus truncation

use crate::data::{SalesRecord, SalesTable};
use std::collections::BTreeSet;

/// Filter settings chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub year: i32,
    pub min_sales: u32,
    pub categories: BTreeSet<String>,
    pub limit: usize,
}

impl FilterConfig {
    pub fn new<I, S>(year: i32, min_sales: u32, categories: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            year,
            min_sales,
            categories: categories.into_iter().map(Into::into).collect(),
            limit,
        }
    }

    /// True when a row passes all three predicates
    pub fn matches(&self, row: &SalesRecord) -> bool {
        row.year == self.year
            && row.sales >= self.min_sales
            && self.categories.contains(&row.category)
    }
}

/// Keep the first `limit` matching rows, in dataset order
pub fn apply_filter(data: &SalesTable, config: &FilterConfig) -> SalesTable {
    let rows: Vec<SalesRecord> = data
        .rows()
        .iter()
        .filter(|row| config.matches(row))
        .take(config.limit)
        .cloned()
        .collect();
    SalesTable::new(rows)
}
