// Library exports for salesboard

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod data;
pub mod filter;
pub mod generator;
pub mod graph;
pub mod session;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    #[default]
    Png,
    #[serde(rename = "svg")]
    Svg,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default, rename = "type")]
    pub format: OutputFormat,
    #[serde(default = "default_bar_color")]
    pub bar_color: String,
    #[serde(default = "default_line_color")]
    pub line_color: String,
}

fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_bar_color() -> String { "orange".to_string() }
fn default_line_color() -> String { "green".to_string() }

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            format: OutputFormat::Png,
            bar_color: default_bar_color(),
            line_color: default_line_color(),
        }
    }
}
