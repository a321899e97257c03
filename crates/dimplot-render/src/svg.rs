//! An SVG-document drawing surface.

use crate::surface::{DrawingSurface, Primitive, Shape};
use std::fmt::Write as _;

/// Collects primitives and serializes them as a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    font_family: String,
    primitives: Vec<Primitive>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            font_family: "sans-serif".to_string(),
            primitives: Vec::new(),
        }
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let w = fmt(self.width);
        let h = fmt(self.height);
        let _ = write!(
            &mut out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="boxplot" font-family="{}">"#,
            escape_xml(&self.font_family)
        );
        for p in &self.primitives {
            write_primitive(&mut out, p);
        }
        out.push_str("</svg>\n");
        out
    }
}

impl DrawingSurface for SvgSurface {
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

fn write_primitive(out: &mut String, p: &Primitive) {
    let mut common = format!(r#" class="{}""#, p.class.as_str());
    if let Some(name) = p.category.as_deref() {
        let _ = write!(&mut common, r#" data-category="{}""#, escape_xml(name));
    }

    match &p.shape {
        Shape::Rect(r) => {
            let _ = write!(
                out,
                r#"<rect{common} x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                fmt(r.x),
                fmt(r.y),
                fmt(r.width),
                fmt(r.height),
                escape_xml(r.fill.as_deref().unwrap_or("none")),
            );
            if let Some(s) = &r.stroke {
                let _ = write!(
                    out,
                    r#" stroke="{}" stroke-width="{}""#,
                    escape_xml(&s.color),
                    fmt(s.width)
                );
            }
            out.push_str("/>");
        }
        Shape::Line(l) => {
            let _ = write!(
                out,
                r#"<line{common} x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                fmt(l.x1),
                fmt(l.y1),
                fmt(l.x2),
                fmt(l.y2),
                escape_xml(&l.stroke.color),
                fmt(l.stroke.width),
            );
        }
        Shape::Circle(c) => {
            let _ = write!(
                out,
                r#"<circle{common} cx="{}" cy="{}" r="{}" fill="{}" opacity="{}"/>"#,
                fmt(c.cx),
                fmt(c.cy),
                fmt(c.r),
                escape_xml(&c.fill),
                fmt(c.opacity),
            );
        }
        Shape::Text(t) => {
            let _ = write!(
                out,
                r#"<text{common} x="{}" y="{}" font-size="{}" text-anchor="{}" fill="{}""#,
                fmt(t.x),
                fmt(t.y),
                fmt(t.font_size),
                t.anchor.as_str(),
                escape_xml(&t.fill),
            );
            if let Some(weight) = t.font_weight.as_deref() {
                let _ = write!(out, r#" font-weight="{}""#, escape_xml(weight));
            }
            if t.dy_em != 0.0 {
                let _ = write!(out, r#" dy="{}em""#, fmt(t.dy_em));
            }
            if let Some(rot) = &t.rotation {
                let _ = write!(
                    out,
                    r#" transform="rotate({},{},{})""#,
                    fmt(rot.angle),
                    fmt(rot.cx),
                    fmt(rot.cy)
                );
            }
            let _ = write!(out, ">{}</text>", escape_xml(&t.text));
        }
    }
}

/// Number form used in attributes: shortest round-trip decimal, with `-0` and float noise folded.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }
    format!("{v}")
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{ElementClass, LinePrimitive, Stroke, TextAnchor, TextPrimitive};

    #[test]
    fn fmt_folds_noise() {
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(1.0000004), "1");
        assert_eq!(fmt(-1.0000004), "-1");
        assert_eq!(fmt(12.5), "12.5");
    }

    #[test]
    fn escape_xml_covers_markup() {
        assert_eq!(escape_xml(r#"a<b & "c">'d'"#), "a&lt;b &amp; &quot;c&quot;&gt;&#39;d&#39;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn serializes_classes_and_categories() {
        let mut s = SvgSurface::new(200.0, 100.0);
        s.append(
            Primitive::new(
                ElementClass::Median,
                Shape::Line(LinePrimitive {
                    x1: 0.0,
                    y1: 1.5,
                    x2: 10.0,
                    y2: 1.5,
                    stroke: Stroke::new("#1f77b4", 2.0),
                }),
            )
            .for_category("A&B"),
        );
        s.append(Primitive::new(
            ElementClass::Title,
            Shape::Text(TextPrimitive {
                x: 100.0,
                y: 25.0,
                text: "<T>".to_string(),
                font_size: 18.0,
                font_weight: Some("bold".to_string()),
                anchor: TextAnchor::Middle,
                dy_em: 0.0,
                rotation: None,
                fill: "black".to_string(),
            }),
        ));
        let svg = s.to_svg_string();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100""#));
        assert!(svg.contains(r##"<line class="median" data-category="A&amp;B" x1="0" y1="1.5" x2="10" y2="1.5" stroke="#1f77b4" stroke-width="2"/>"##));
        assert!(svg.contains(r#"font-weight="bold">&lt;T&gt;</text>"#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn clear_empties_the_document() {
        let mut s = SvgSurface::new(10.0, 10.0);
        s.clear();
        assert!(s.primitives().is_empty());
        s.append(Primitive::new(
            ElementClass::AxisDomain,
            Shape::Line(LinePrimitive {
                x1: 0.0,
                y1: 0.0,
                x2: 1.0,
                y2: 1.0,
                stroke: Stroke::new("black", 1.0),
            }),
        ));
        s.clear();
        assert!(s.primitives().is_empty());
        assert!(!s.to_svg_string().contains("<line"));
    }
}
