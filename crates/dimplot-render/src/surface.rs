//! The drawing-surface boundary consumed by the renderer.
//!
//! Primitives are append-only: they are never queried back or changed once appended.

use serde::{Deserialize, Serialize};

pub trait DrawingSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// Removes every primitive. Clearing an empty surface is a no-op.
    fn clear(&mut self);
    fn append(&mut self, primitive: Primitive);
}

/// What a primitive depicts. Emitted as the SVG `class` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementClass {
    Background,
    Title,
    AxisDomain,
    AxisTick,
    AxisLabel,
    Box,
    Median,
    Whisker,
    WhiskerCap,
    Point,
}

impl ElementClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Title => "title",
            Self::AxisDomain => "axis-domain",
            Self::AxisTick => "axis-tick",
            Self::AxisLabel => "axis-label",
            Self::Box => "box",
            Self::Median => "median",
            Self::Whisker => "whisker",
            Self::WhiskerCap => "whisker-cap",
            Self::Point => "point",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Rotation in degrees about `(cx, cy)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub angle: f64,
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<String>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    pub font_weight: Option<String>,
    pub anchor: TextAnchor,
    /// Baseline shift in em units.
    pub dy_em: f64,
    pub rotation: Option<Rotation>,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rect(RectPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
    Circle(CirclePrimitive),
}

/// A shape plus what it depicts and, for per-category elements, which category it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub class: ElementClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub shape: Shape,
}

impl Primitive {
    pub fn new(class: ElementClass, shape: Shape) -> Self {
        Self {
            class,
            category: None,
            shape,
        }
    }

    pub fn for_category(mut self, name: &str) -> Self {
        self.category = Some(name.to_string());
        self
    }
}

/// Records primitives in memory. Handy for hosts that paint with their own backend.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.primitives.clear();
    }

    fn append(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }
}
