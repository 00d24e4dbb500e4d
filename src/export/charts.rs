//! SVG line charts of a projection
//!
//! Two charts are produced: the balance over time (gross, with the real series
//! overlaid when inflation is modeled) and the composition of the balance
//! (cumulative contributions, interest and tax).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt::Write;

use crate::projection::{MonthlyRecord, ProjectionResult};

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const Y_TICKS: usize = 5;

const PALETTE: [&str; 4] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728"];

/// A named series of (month, value) points
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    fn from_records<F>(name: &str, records: &[MonthlyRecord], value: F) -> Self
    where
        F: Fn(&MonthlyRecord) -> Decimal,
    {
        Self {
            name: name.to_string(),
            points: records
                .iter()
                .map(|r| (f64::from(r.month), value(r).to_f64().unwrap_or(0.0)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl LineChart {
    /// Gross balance, plus the inflation-adjusted balance when inflation is modeled
    pub fn balance(result: &ProjectionResult) -> Self {
        let records = result.monthly();
        let mut series = vec![Series::from_records("Gross balance", records, |r| r.gross_balance)];
        if result.parameters().annual_inflation_rate > Decimal::ZERO {
            series.push(Series::from_records(
                "Real balance (inflation-adjusted)",
                records,
                |r| r.real_balance,
            ));
        }

        Self {
            title: "Investment growth with compound interest".to_string(),
            x_label: "Month".to_string(),
            y_label: "Balance".to_string(),
            series,
        }
    }

    /// Running totals of contributions, interest and tax
    pub fn composition(result: &ProjectionResult) -> Self {
        let records = result.monthly();
        Self {
            title: "Composition of accumulated wealth".to_string(),
            x_label: "Month".to_string(),
            y_label: "Accumulated value".to_string(),
            series: vec![
                Series::from_records("Total contributed", records, |r| r.cumulative_contributions),
                Series::from_records("Total interest", records, |r| r.cumulative_interest),
                Series::from_records("Total tax paid", records, |r| r.cumulative_tax),
            ],
        }
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let (mut x_max, mut y_min, mut y_max) = (1.0_f64, 0.0_f64, 0.0_f64);
        for &(x, y) in points {
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if y_max <= y_min {
            y_max = y_min + 1.0;
        }
        (0.0, x_max, y_min, y_max)
    }

    /// Render as a standalone SVG document
    pub fn render_svg(&self) -> String {
        let (x_min, x_max, y_min, y_max) = self.bounds();
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let sx = |x: f64| MARGIN_LEFT + (x - x_min) / (x_max - x_min) * plot_w;
        let sy = |y: f64| MARGIN_TOP + plot_h - (y - y_min) / (y_max - y_min) * plot_h;

        // Writing to a String cannot fail
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif" font-size="12">"#
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="28" text-anchor="middle" font-size="16">{}</text>"#,
            WIDTH / 2.0,
            escape(&self.title)
        );

        // grid and y ticks
        for i in 0..=Y_TICKS {
            let value = y_min + (y_max - y_min) * i as f64 / Y_TICKS as f64;
            let y = sy(value);
            let _ = writeln!(
                svg,
                r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#dddddd"/>"##,
                WIDTH - MARGIN_RIGHT
            );
            let _ = writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{value:.0}</text>"#,
                MARGIN_LEFT - 8.0,
                y + 4.0
            );
        }

        // axes
        let _ = writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
            MARGIN_TOP + plot_h,
            WIDTH - MARGIN_RIGHT,
            MARGIN_TOP + plot_h
        );
        let _ = writeln!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{:.1}" stroke="black"/>"#,
            MARGIN_TOP + plot_h
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            HEIGHT - 15.0,
            escape(&self.x_label)
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" transform="rotate(-90 20 {:.1})">{}</text>"#,
            20.0,
            MARGIN_TOP + plot_h / 2.0,
            MARGIN_TOP + plot_h / 2.0,
            escape(&self.y_label)
        );

        for (i, series) in self.series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            if !series.points.is_empty() {
                let path: Vec<String> = series
                    .points
                    .iter()
                    .map(|&(x, y)| format!("{:.2},{:.2}", sx(x), sy(y)))
                    .collect();
                let _ = writeln!(
                    svg,
                    r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{}"/>"#,
                    path.join(" ")
                );
            }

            // legend
            let ly = MARGIN_TOP + 10.0 + i as f64 * 18.0;
            let _ = writeln!(
                svg,
                r#"<line x1="{:.1}" y1="{ly:.1}" x2="{:.1}" y2="{ly:.1}" stroke="{color}" stroke-width="3"/>"#,
                MARGIN_LEFT + 12.0,
                MARGIN_LEFT + 36.0
            );
            let _ = writeln!(
                svg,
                r#"<text x="{:.1}" y="{:.1}">{}</text>"#,
                MARGIN_LEFT + 42.0,
                ly + 4.0,
                escape(&series.name)
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
