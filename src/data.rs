use anyhow::{Context, Result};
use serde::Serialize;

/// Column headers used for every tabular export
pub const HEADERS: [&str; 4] = ["Year", "Product", "Type", "Sales"];

/// One row of the sales dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Type")]
    pub category: String,
    #[serde(rename = "Sales")]
    pub sales: u32,
}

impl SalesRecord {
    pub fn new(year: i32, product: &str, category: &str, sales: u32) -> Self {
        Self {
            year,
            product: product.to_string(),
            category: category.to_string(),
            sales,
        }
    }
}

/// Immutable, ordered table of sales rows.
///
/// Filtering and aggregation never touch a table in place; they build new
/// tables or summaries from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SalesTable {
    rows: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn new(rows: Vec<SalesRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SalesRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years in ascending order
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for row in &self.rows {
            if !categories.contains(&row.category) {
                categories.push(row.category.clone());
            }
        }
        categories
    }

    /// Distinct products in order of first appearance
    pub fn products(&self) -> Vec<String> {
        let mut products: Vec<String> = Vec::new();
        for row in &self.rows {
            if !products.contains(&row.product) {
                products.push(row.product.clone());
            }
        }
        products
    }

    pub fn max_sales(&self) -> Option<u32> {
        self.rows.iter().map(|r| r.sales).max()
    }

    pub fn total_sales(&self) -> u64 {
        self.rows.iter().map(|r| r.sales as u64).sum()
    }

    /// Serialize the table as CSV with a header row
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADERS)
            .context("Failed to write CSV header")?;
        for row in &self.rows {
            writer
                .write_record(&[
                    row.year.to_string(),
                    row.product.clone(),
                    row.category.clone(),
                    row.sales.to_string(),
                ])
                .context("Failed to write CSV row")?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }

    /// Serialize the table as a JSON array of objects
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize table as JSON")
    }

    /// Render the table as an aligned plain-text grid
    pub fn to_text(&self) -> String {
        let cells: Vec<[String; 4]> = self
            .rows
            .iter()
            .map(|r| {
                [
                    r.year.to_string(),
                    r.product.clone(),
                    r.category.clone(),
                    r.sales.to_string(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        push_line(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &cells {
            push_line(&mut out, row, &widths);
        }
        if cells.is_empty() {
            out.push_str("(no matching rows)\n");
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(idx, (cell, width))| {
            // Year and Sales are numeric and right-aligned
            if idx == 0 || idx == 3 {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
