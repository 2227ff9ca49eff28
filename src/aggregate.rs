// Chart aggregations over sales tables

use crate::data::SalesTable;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Total sales for one product (one bar)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductTotal {
    pub product: String,
    pub sales: u64,
}

/// Total sales for one year (one point on the trend line)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    pub sales: u64,
}

/// Sum sales per product, ordered by first appearance in `filtered`
pub fn bar_totals(filtered: &SalesTable) -> Vec<ProductTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<ProductTotal> = Vec::new();

    for row in filtered.rows() {
        let slot = *index.entry(row.product.as_str()).or_insert_with(|| {
            totals.push(ProductTotal {
                product: row.product.clone(),
                sales: 0,
            });
            totals.len() - 1
        });
        totals[slot].sales += row.sales as u64;
    }

    totals
}

/// Sum sales per year over the full dataset, restricted to the products that
/// appear in `filtered`. Ordered ascending by year.
pub fn line_totals(full: &SalesTable, filtered: &SalesTable) -> Vec<YearTotal> {
    let products: HashSet<&str> = filtered.rows().iter().map(|r| r.product.as_str()).collect();

    let mut per_year: BTreeMap<i32, u64> = BTreeMap::new();
    for row in full.rows() {
        if products.contains(row.product.as_str()) {
            *per_year.entry(row.year).or_insert(0) += row.sales as u64;
        }
    }

    per_year
        .into_iter()
        .map(|(year, sales)| YearTotal { year, sales })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, YearRange};
    use crate::data::SalesRecord;
    use crate::filter::{apply_filter, FilterConfig};
    use crate::generator::{generate, SalesRange};

    fn scenario() -> SalesTable {
        SalesTable::new(vec![
            SalesRecord::new(2018, "Smartphone", "Electronics", 500),
            SalesRecord::new(2018, "T-shirt", "Clothing", 150),
            SalesRecord::new(2019, "Smartphone", "Electronics", 700),
            SalesRecord::new(2019, "T-shirt", "Clothing", 300),
        ])
    }

    #[test]
    fn test_scenario_aggregations() {
        let full = scenario();
        let config = FilterConfig::new(2018, 200, ["Electronics", "Clothing"], 5);
        let filtered = apply_filter(&full, &config);

        assert_eq!(
            bar_totals(&filtered),
            vec![ProductTotal { product: "Smartphone".to_string(), sales: 500 }]
        );
        assert_eq!(
            line_totals(&full, &filtered),
            vec![
                YearTotal { year: 2018, sales: 500 },
                YearTotal { year: 2019, sales: 700 },
            ]
        );
    }

    #[test]
    fn test_bar_groups_repeated_products_in_first_appearance_order() {
        let rows = SalesTable::new(vec![
            SalesRecord::new(2018, "Soda", "Food", 10),
            SalesRecord::new(2018, "Chips", "Food", 20),
            SalesRecord::new(2018, "Soda", "Food", 5),
        ]);
        assert_eq!(
            bar_totals(&rows),
            vec![
                ProductTotal { product: "Soda".to_string(), sales: 15 },
                ProductTotal { product: "Chips".to_string(), sales: 20 },
            ]
        );
    }

    #[test]
    fn test_empty_inputs() {
        let empty = SalesTable::default();
        assert!(bar_totals(&empty).is_empty());
        assert!(line_totals(&scenario(), &empty).is_empty());
        assert!(line_totals(&empty, &scenario()).is_empty());
    }

    #[test]
    fn test_bar_total_matches_filtered_sum() {
        let full = generate(&Catalog::retail(), YearRange::default(), SalesRange::default(), 5);
        let config = FilterConfig::new(2022, 300, ["Electronics", "Books", "Food"], 8);
        let filtered = apply_filter(&full, &config);
        let sum: u64 = bar_totals(&filtered).iter().map(|t| t.sales).sum();
        assert_eq!(sum, filtered.total_sales());
    }

    #[test]
    fn test_line_spans_all_years() {
        let full = generate(&Catalog::retail(), YearRange::default(), SalesRange::default(), 8);
        let config = FilterConfig::new(2020, 0, ["Electronics"], 2);
        let filtered = apply_filter(&full, &config);
        let line = line_totals(&full, &filtered);

        let years: Vec<i32> = line.iter().map(|t| t.year).collect();
        assert_eq!(years, YearRange::default().years());

        let products = filtered.products();
        for point in &line {
            let expected: u64 = full
                .rows()
                .iter()
                .filter(|r| r.year == point.year && products.contains(&r.product))
                .map(|r| r.sales as u64)
                .sum();
            assert_eq!(point.sales, expected);
        }
    }

    #[test]
    fn test_line_independent_of_selected_year() {
        let full = generate(&Catalog::retail(), YearRange::default(), SalesRange::default(), 13);
        // Zero threshold with a single category: every year selects the same products
        let in_2018 = apply_filter(&full, &FilterConfig::new(2018, 0, ["Books"], 20));
        let in_2023 = apply_filter(&full, &FilterConfig::new(2023, 0, ["Books"], 20));
        assert_eq!(in_2018.products(), in_2023.products());
        assert_eq!(line_totals(&full, &in_2018), line_totals(&full, &in_2023));
    }

    #[test]
    fn test_repeat_runs_identical() {
        let full = generate(&Catalog::retail(), YearRange::default(), SalesRange::default(), 21);
        let config = FilterConfig::new(2019, 150, ["Clothing", "Food"], 5);
        let first = apply_filter(&full, &config);
        let second = apply_filter(&full, &config);
        assert_eq!(first, second);
        assert_eq!(bar_totals(&first), bar_totals(&second));
        assert_eq!(line_totals(&full, &first), line_totals(&full, &second));
    }
}
