//! Plot-ready models consumed by the renderer

use chrono::Duration;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);

    /// CSS hex form, e.g. `#0ebfe9`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A single circle on the chart
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    /// Hover text, name plus diameter
    pub label: String,
    /// Offset from midnight of the plotted day
    pub x: Duration,
    /// Miss distance in miles
    pub y: f64,
    /// Radius in x-axis units (milliseconds)
    pub radius: f64,
    /// Fill color from the distance rank
    pub color: Rgb,
    /// Page opened when the circle is clicked
    pub url: String,
}

impl PlotPoint {
    pub fn x_hours(&self) -> f64 {
        self.x.num_milliseconds() as f64 / 3_600_000.0
    }

    pub fn radius_hours(&self) -> f64 {
        self.radius / 3_600_000.0
    }
}

/// Everything the renderer needs for one chart
#[derive(Debug, Clone)]
pub struct PlotData {
    pub title: String,
    /// Moon scale disclosure, absent when no ratio can be computed
    pub annotation: Option<String>,
    pub citation: String,
    pub points: Vec<PlotPoint>,
}
