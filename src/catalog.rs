// Product catalog and year range used to build the sample dataset

/// A single product and the category it is sold under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub product: String,
    pub category: String,
}

impl CatalogEntry {
    pub fn new(product: &str, category: &str) -> Self {
        Self {
            product: product.to_string(),
            category: category.to_string(),
        }
    }
}

/// Ordered list of (product, category) pairs.
///
/// Each product maps to exactly one category; the order of entries is the
/// order products appear in generated data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The retail catalog shipped with the dashboard
    pub fn retail() -> Self {
        let pairs = [
            ("Smartphone", "Electronics"),
            ("Laptop", "Electronics"),
            ("Tablet", "Electronics"),
            ("T-shirt", "Clothing"),
            ("Jeans", "Clothing"),
            ("Jacket", "Clothing"),
            ("Pizza", "Food"),
            ("Pasta", "Food"),
            ("Soda", "Food"),
            ("Fiction Book", "Books"),
            ("Non-Fiction Book", "Books"),
            ("Textbook", "Books"),
            ("Headphones", "Electronics"),
            ("Smartwatch", "Electronics"),
            ("Sneakers", "Clothing"),
            ("Chips", "Food"),
            ("Candy", "Food"),
            ("Novel", "Books"),
            ("Cookbook", "Books"),
            ("Dress", "Clothing"),
        ];

        Self::new(
            pairs
                .iter()
                .map(|(product, category)| CatalogEntry::new(product, category))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.category) {
                seen.push(entry.category.clone());
            }
        }
        seen
    }

    /// Fixed product -> category lookup
    pub fn category_of(&self, product: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.product == product)
            .map(|e| e.category.as_str())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::retail()
    }
}

/// Contiguous, inclusive range of years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl YearRange {
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    pub fn years(&self) -> Vec<i32> {
        (self.first..=self.last).collect()
    }

    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last as i64 - self.first as i64 + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            first: 2018,
            last: 2023,
        }
    }
}
