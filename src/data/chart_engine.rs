//! Chart rendering
//!
//! A [`ChartRenderer`] turns a label column and a value column into a chart
//! object. The builtin [`LineChartRenderer`] produces a [`LineChart`], which
//! can be written out as SVG.

use crate::constants::CHART_PADDING;
use crate::data::table::ColumnData;
use serde::Serialize;
use std::fmt::Write as _;

/// Chart color palette - distinct colors for data visualization
pub const CHART_COLORS: [&str; 8] = [
    "#2f6fed", // Bright Blue
    "#1e9e58", // Green
    "#f28b1a", // Orange
    "#8c4fd8", // Violet/Purple
    "#e03c3c", // Red
    "#1fb2a6", // Cyan/Teal
    "#e6c619", // Yellow
    "#d84fa6", // Pink/Magenta
];

/// Builds a chart from two columns
pub trait ChartRenderer {
    type Chart;

    fn render(&self, label: &ColumnData, value: &ColumnData) -> Self::Chart;
}

/// A single data point in a chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Label for this point (X-axis)
    pub label: String,
    /// Numeric value (Y-axis)
    pub value: f64,
}

/// Single-series line chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineChart {
    /// X-axis column name
    pub x_label: String,
    /// Y-axis column name
    pub y_label: String,
    pub points: Vec<ChartPoint>,
    pub min_value: f64,
    pub max_value: f64,
    pub color: String,
}

impl LineChart {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Standalone SVG document of the chart
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        let w = width as f64;
        let h = height as f64;
        let plot_w = (w - 2.0 * CHART_PADDING).max(1.0);
        let plot_h = (h - 2.0 * CHART_PADDING).max(1.0);
        let span = self.max_value - self.min_value;

        let x_at = |i: usize| {
            if self.points.len() <= 1 {
                CHART_PADDING + plot_w / 2.0
            } else {
                CHART_PADDING + plot_w * i as f64 / (self.points.len() - 1) as f64
            }
        };
        let y_at = |v: f64| {
            if span == 0.0 {
                CHART_PADDING + plot_h / 2.0
            } else {
                CHART_PADDING + plot_h * (1.0 - (v - self.min_value) / span)
            }
        };

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="white"/>"#);

        // Axes
        let bottom = CHART_PADDING + plot_h;
        let _ = writeln!(
            svg,
            r##"  <path d="M{p:.1} {p:.1} V{bottom:.1} H{right:.1}" stroke="#444" fill="none"/>"##,
            p = CHART_PADDING,
            right = CHART_PADDING + plot_w,
        );

        if !self.points.is_empty() {
            let coords: Vec<String> = self
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{:.1},{:.1}", x_at(i), y_at(p.value)))
                .collect();
            let _ = writeln!(
                svg,
                r#"  <polyline points="{}" stroke="{}" stroke-width="2" fill="none"/>"#,
                coords.join(" "),
                self.color
            );

            for (i, point) in self.points.iter().enumerate() {
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"><title>{}: {}</title></circle>"#,
                    x_at(i),
                    y_at(point.value),
                    self.color,
                    escape(&point.label),
                    point.value
                );
            }

            let _ = writeln!(
                svg,
                r#"  <text x="4" y="{:.1}" font-size="11">{}</text>"#,
                y_at(self.max_value) + 4.0,
                self.max_value
            );
            let _ = writeln!(
                svg,
                r#"  <text x="4" y="{:.1}" font-size="11">{}</text>"#,
                y_at(self.min_value) + 4.0,
                self.min_value
            );
        }

        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle">{}</text>"#,
            CHART_PADDING + plot_w / 2.0,
            h - CHART_PADDING / 3.0,
            escape(&self.x_label)
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle" transform="rotate(-90 {:.1} {:.1})">{}</text>"#,
            CHART_PADDING / 3.0,
            CHART_PADDING + plot_h / 2.0,
            CHART_PADDING / 3.0,
            CHART_PADDING + plot_h / 2.0,
            escape(&self.y_label)
        );
        svg.push_str("</svg>\n");
        svg
    }
}

/// Line chart renderer with a fixed series color
#[derive(Clone, Debug)]
pub struct LineChartRenderer {
    color: &'static str,
}

impl Default for LineChartRenderer {
    fn default() -> Self {
        Self {
            color: CHART_COLORS[0],
        }
    }
}

impl LineChartRenderer {
    /// Renderer using the palette color at `index`, wrapping around
    pub fn with_palette_index(index: usize) -> Self {
        Self {
            color: CHART_COLORS[index % CHART_COLORS.len()],
        }
    }
}

impl ChartRenderer for LineChartRenderer {
    type Chart = LineChart;

    /// Rows whose value is not a finite number are skipped. Data order is
    /// kept and the longer column is truncated to the shorter one.
    fn render(&self, label: &ColumnData, value: &ColumnData) -> LineChart {
        let points: Vec<ChartPoint> = label
            .cells
            .iter()
            .zip(value.cells.iter())
            .filter_map(|(l, v)| {
                v.as_f64()
                    .filter(|value| value.is_finite())
                    .map(|value| ChartPoint {
                        label: l.to_display(),
                        value,
                    })
            })
            .collect();

        let (min_value, max_value) = points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), p| (lo.min(p.value), hi.max(p.value)),
        );

        LineChart {
            x_label: label.name.clone(),
            y_label: value.name.clone(),
            points,
            min_value: if min_value == f64::INFINITY { 0.0 } else { min_value },
            max_value: if max_value == f64::NEG_INFINITY { 0.0 } else { max_value },
            color: self.color.to_string(),
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
