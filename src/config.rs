//! Dashboard configuration.
//!
//! Loaded from an optional JSON file. Every field has a default, so an empty
//! object (or no file at all) gives the stock retail dashboard.

use crate::catalog::YearRange;
use crate::generator::SalesRange;
use crate::RenderOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Widest year range a config may ask for
pub const MAX_YEAR_SPAN: i64 = 100;
/// Largest chart width or height in pixels
pub const MAX_CHART_SIDE: u32 = 8192;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default = "default_first_year")]
    pub first_year: i32,
    #[serde(default = "default_last_year")]
    pub last_year: i32,
    #[serde(default = "default_sales_low")]
    pub sales_low: u32,
    #[serde(default = "default_sales_high")]
    pub sales_high: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub render: RenderOptions,
}

fn default_first_year() -> i32 { 2018 }
fn default_last_year() -> i32 { 2023 }
fn default_sales_low() -> u32 { 100 }
fn default_sales_high() -> u32 { 1000 }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            first_year: default_first_year(),
            last_year: default_last_year(),
            sales_low: default_sales_low(),
            sales_high: default_sales_high(),
            seed: None,
            render: RenderOptions::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_year > self.last_year {
            return Err(ConfigError::Invalid(format!(
                "first_year {} is after last_year {}",
                self.first_year, self.last_year
            )));
        }
        if self.years().len() as i64 > MAX_YEAR_SPAN {
            return Err(ConfigError::Invalid(format!(
                "year range {}..={} spans more than {} years",
                self.first_year, self.last_year, MAX_YEAR_SPAN
            )));
        }
        if self.sales_low >= self.sales_high {
            return Err(ConfigError::Invalid(format!(
                "sales range [{}, {}) is empty",
                self.sales_low, self.sales_high
            )));
        }
        let side_ok = |side: u32| side > 0 && side <= MAX_CHART_SIDE;
        if !side_ok(self.render.width) || !side_ok(self.render.height) {
            return Err(ConfigError::Invalid(format!(
                "chart size {}x{} must be between 1 and {} on each side",
                self.render.width, self.render.height, MAX_CHART_SIDE
            )));
        }
        Ok(())
    }

    pub fn years(&self) -> YearRange {
        YearRange::new(self.first_year, self.last_year)
    }

    pub fn sales_range(&self) -> SalesRange {
        SalesRange::new(self.sales_low, self.sales_high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputFormat;

    fn parse(text: &str) -> Result<DashboardConfig, ConfigError> {
        DashboardConfig::from_json(text, Path::new("test.json"))
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = parse("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.years(), YearRange::new(2018, 2023));
        assert_eq!(config.sales_range(), SalesRange::new(100, 1000));
        assert_eq!(config.render.format, OutputFormat::Png);
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r##"{"first_year": 2020, "last_year": 2021, "seed": 9,
                "render": {"type": "svg", "width": 400, "bar_color": "#336699"}}"##,
        )
        .unwrap();
        assert_eq!(config.years().years(), vec![2020, 2021]);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.render.format, OutputFormat::Svg);
        assert_eq!(config.render.width, 400);
        assert_eq!(config.render.height, 600);
        assert_eq!(config.render.bar_color, "#336699");
        assert_eq!(config.render.line_color, "green");
    }

    #[test]
    fn test_rejects_reversed_years() {
        let err = parse(r#"{"first_year": 2024, "last_year": 2020}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_sales_range() {
        let err = parse(r#"{"sales_low": 500, "sales_high": 500}"#).unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn test_rejects_extreme_year_range() {
        let err = parse(r#"{"first_year": -2147483648, "last_year": 2147483647}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("more than 100 years"));
    }

    #[test]
    fn test_accepts_widest_year_range() {
        let config = parse(r#"{"first_year": 1900, "last_year": 1999}"#).unwrap();
        assert_eq!(config.years().len(), 100);
        assert!(parse(r#"{"first_year": 1900, "last_year": 2000}"#).is_err());
    }

    #[test]
    fn test_rejects_oversized_chart() {
        let err = parse(r#"{"render": {"width": 40000, "height": 40000}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(parse(r#"{"render": {"width": 8192, "height": 8193}}"#).is_err());
        assert!(parse(r#"{"render": {"width": 8192, "height": 8192}}"#).is_ok());
        assert!(parse(r#"{"render": {"width": 0}}"#).is_err());
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = parse(r#"{"years": [2018]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = DashboardConfig::from_file(Path::new("/nonexistent/salesboard.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
