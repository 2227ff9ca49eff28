use crate::aggregate::{ProductTotal, YearTotal};
use crate::{OutputFormat, RenderOptions};
use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;

/// Something that can draw itself onto any plotters backend
pub trait Chart {
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static;
}

/// Per-product totals drawn as vertical bars, in aggregation order
pub struct BarChart<'a> {
    pub totals: &'a [ProductTotal],
    pub color: RGBColor,
}

impl<'a> BarChart<'a> {
    pub fn new(totals: &'a [ProductTotal], options: &RenderOptions) -> Self {
        Self {
            totals,
            color: parse_color(&options.bar_color, ORANGE),
        }
    }
}

impl Chart for BarChart<'_> {
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).context("Failed to fill background")?;

        let names: Vec<&str> = self.totals.iter().map(|t| t.product.as_str()).collect();
        // An empty chart still gets one slot so the axes can be laid out
        let slots = names.len().max(1) as i32;
        let y_range = 0.0..value_ceiling(self.totals.iter().map(|t| t.sales));

        let mut chart = ChartBuilder::on(root)
            .margin(10)
            .caption("Sales by Product", ("sans-serif", 20))
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d((0..slots).into_segmented(), y_range)
            .context("Failed to build chart")?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Product")
            .y_desc("Sales")
            .x_labels(slots as usize)
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(idx) => names
                    .get(*idx as usize)
                    .map(|name| name.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .context("Failed to draw mesh")?;

        let style = self.color.filled();
        chart
            .draw_series(self.totals.iter().enumerate().map(|(idx, t)| {
                let idx = idx as i32;
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(idx), 0.0),
                        (SegmentValue::Exact(idx + 1), t.sales as f64),
                    ],
                    style,
                );
                bar.set_margin(0, 0, 10, 10);
                bar
            }))
            .context("Failed to draw bars")?;

        Ok(())
    }
}

/// Per-year totals drawn as a line with circle markers
pub struct LineChart<'a> {
    pub totals: &'a [YearTotal],
    pub color: RGBColor,
}

impl<'a> LineChart<'a> {
    pub fn new(totals: &'a [YearTotal], options: &RenderOptions) -> Self {
        Self {
            totals,
            color: parse_color(&options.line_color, GREEN_LINE),
        }
    }
}

impl Chart for LineChart<'_> {
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).context("Failed to fill background")?;

        let x_range = year_span(self.totals);
        let y_range = 0.0..value_ceiling(self.totals.iter().map(|t| t.sales));

        let mut chart = ChartBuilder::on(root)
            .margin(10)
            .caption("Sales Trend Over Years", ("sans-serif", 20))
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .context("Failed to build chart")?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Sales")
            .draw()
            .context("Failed to draw mesh")?;

        let points: Vec<(i32, f64)> = self
            .totals
            .iter()
            .map(|t| (t.year, t.sales as f64))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), self.color.stroke_width(2)))
            .context("Failed to draw line series")?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, self.color.filled())),
            )
            .context("Failed to draw markers")?;

        Ok(())
    }
}

/// Render a chart to PNG or SVG bytes according to `options`
pub fn render<C: Chart>(chart: &C, options: &RenderOptions) -> Result<Vec<u8>> {
    let (width, height) = (options.width, options.height);
    match options.format {
        OutputFormat::Png => {
            let mut buffer = vec![0u8; bitmap_len(width, height)];
            {
                let root = BitMapBackend::with_buffer(&mut buffer, (width, height))
                    .into_drawing_area();
                chart.draw(&root)?;
                root.present().context("Failed to present drawing")?;
            }
            encode_png(&buffer, width, height)
        }
        OutputFormat::Svg => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
                chart.draw(&root)?;
                root.present().context("Failed to present drawing")?;
            }
            Ok(svg.into_bytes())
        }
    }
}

/// Bytes needed for an RGB bitmap of the given size
fn bitmap_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Encode an RGB buffer as PNG
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(buffer, width, height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }

    Ok(png_bytes)
}

/// Upper bound of the value axis: the largest total plus 5% headroom
fn value_ceiling<I: Iterator<Item = u64>>(values: I) -> f64 {
    let max = values.max().unwrap_or(0) as f64;
    if max <= 0.0 {
        1.0
    } else {
        max * 1.05
    }
}

/// X range covering every year with one year of padding on each side
fn year_span(totals: &[YearTotal]) -> Range<i32> {
    let first = totals.iter().map(|t| t.year).min();
    let last = totals.iter().map(|t| t.year).max();
    match (first, last) {
        (Some(first), Some(last)) => first.saturating_sub(1)..last.saturating_add(1),
        _ => 0..1,
    }
}

/// matplotlib's "green", darker than plotters' pure GREEN
const GREEN_LINE: RGBColor = RGBColor(0, 128, 0);
const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Parse a color name or `#rrggbb` string, falling back to `default`
fn parse_color(color_str: &str, default: RGBColor) -> RGBColor {
    match color_str.to_ascii_lowercase().as_str() {
        "red" => RED,
        "green" => GREEN_LINE,
        "blue" => BLUE,
        "black" => BLACK,
        "yellow" => YELLOW,
        "cyan" => CYAN,
        "magenta" => MAGENTA,
        "orange" => ORANGE,
        hex if hex.len() == 7 && hex.starts_with('#') => {
            let channel = |range: Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
            match (channel(1..3), channel(3..5), channel(5..7)) {
                (Some(r), Some(g), Some(b)) => RGBColor(r, g, b),
                _ => default,
            }
        }
        _ => default,
    }
}
