use dimplot_core::Statistics;
use serde::{Deserialize, Serialize};

/// Positioned geometry for one render.
///
/// The title is in canvas coordinates. Everything else is relative to the plot area, whose top
/// left corner sits at `origin` on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub origin: LayoutPoint,
    pub plot_width: f64,
    pub plot_height: f64,
    pub title: TitleLayout,
    /// `None` when no category had observations.
    pub axes: Option<AxesLayout>,
    pub boxes: Vec<BoxLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleLayout {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesLayout {
    pub value_domain: (f64, f64),
    pub bandwidth: f64,
    /// Category ticks at band centers, in plot order.
    pub x_ticks: Vec<AxisTick>,
    /// Value ticks, bottom to top.
    pub y_ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub label: String,
    /// Pixel offset along the axis.
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxLayout {
    pub name: String,
    pub color: String,
    /// Band start.
    pub x: f64,
    /// Band center.
    pub mid: f64,
    pub width: f64,
    /// `y(q3)`; the upper edge since the value axis grows upward.
    pub box_top: f64,
    /// `y(q1)`.
    pub box_bottom: f64,
    pub median_y: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub cap_half_width: f64,
    pub jitter_start: f64,
    pub jitter_width: f64,
    pub stats: Statistics,
    pub points: Vec<PointLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLayout {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}
