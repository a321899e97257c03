use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 30.0,
            bottom: 70.0,
            left: 50.0,
        }
    }
}

/// Geometry and style knobs for one box plot. Every field has a default, so partial JSON
/// objects are valid configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotConfig {
    /// Canvas width in pixels, used when the caller creates the drawing surface.
    pub width: f64,
    /// Canvas height in pixels, used when the caller creates the drawing surface.
    pub height: f64,
    pub margin: Margin,
    pub font_family: String,
    pub title_font_size: f64,
    pub category_label_font_size: f64,
    pub category_label_rotation: f64,
    pub axis_font_size: f64,
    /// Fraction of each band slot left as gap (inner and outer band padding).
    pub band_padding: f64,
    /// Fraction of the observed value range added above and below it.
    pub value_padding: f64,
    pub y_tick_count: usize,
    pub box_stroke_width: f64,
    pub median_stroke_width: f64,
    pub whisker_stroke_width: f64,
    /// Whisker cap width as a fraction of the band width.
    pub cap_width_fraction: f64,
    pub point_radius: f64,
    pub point_opacity: f64,
    /// Width of the horizontal jitter band as a fraction of the band width.
    pub jitter_fraction: f64,
    /// Seeds the jitter generator; `None` draws a fresh seed per render.
    pub jitter_seed: Option<u64>,
    pub background: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            margin: Margin::default(),
            font_family: "sans-serif".to_string(),
            title_font_size: 18.0,
            category_label_font_size: 14.0,
            category_label_rotation: -45.0,
            axis_font_size: 10.0,
            band_padding: 0.4,
            value_padding: 0.1,
            y_tick_count: 10,
            box_stroke_width: 1.5,
            median_stroke_width: 2.0,
            whisker_stroke_width: 1.0,
            cap_width_fraction: 0.5,
            point_radius: 2.0,
            point_opacity: 0.5,
            jitter_fraction: 0.3,
            jitter_seed: None,
            background: None,
        }
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        message: message.into(),
    }
}

impl PlotConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(invalid(format!("width must be positive, got {}", self.width)));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(invalid(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        // A band padding of 1 would leave zero-width bands.
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(invalid(format!(
                "bandPadding must lie in [0, 1), got {}",
                self.band_padding
            )));
        }
        for (name, v) in [
            ("jitterFraction", self.jitter_fraction),
            ("capWidthFraction", self.cap_width_fraction),
            ("pointOpacity", self.point_opacity),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(invalid(format!("{name} must lie in [0, 1], got {v}")));
            }
        }
        if !(self.value_padding.is_finite() && self.value_padding >= 0.0) {
            return Err(invalid(format!(
                "valuePadding must be non-negative, got {}",
                self.value_padding
            )));
        }
        self.plot_area(self.width, self.height).map(|_| ())
    }

    /// Size of the region inside the margins of a `width` x `height` canvas.
    pub fn plot_area(&self, width: f64, height: f64) -> Result<(f64, f64)> {
        let m = &self.margin;
        let w = width - m.left - m.right;
        let h = height - m.top - m.bottom;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(invalid(format!(
                "margins leave no plot area on a {width}x{height} canvas"
            )));
        }
        Ok((w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_a_plot_area() {
        let cfg = PlotConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.plot_area(800.0, 500.0).unwrap(), (720.0, 380.0));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = PlotConfig::from_json_str(
            r#"{ "width": 640, "margin": { "left": 80 }, "jitterSeed": 7 }"#,
        )
        .unwrap();
        assert_eq!(cfg.width, 640.0);
        assert_eq!(cfg.height, 500.0);
        assert_eq!(cfg.margin.left, 80.0);
        assert_eq!(cfg.margin.top, 50.0);
        assert_eq!(cfg.jitter_seed, Some(7));
        assert_eq!(cfg.band_padding, 0.4);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cfg = PlotConfig {
            band_padding: 1.0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig { .. })));

        let cfg = PlotConfig {
            width: 60.0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig { .. })));

        assert!(matches!(
            PlotConfig::from_json_str(r#"{ "width": "wide" }"#),
            Err(Error::Json(_))
        ));
    }
}
