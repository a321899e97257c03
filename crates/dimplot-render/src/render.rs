use crate::config::PlotConfig;
use crate::layout::layout_box_plot;
use crate::model::{AxesLayout, BoxLayout, BoxPlotLayout};
use crate::surface::{
    CirclePrimitive, DrawingSurface, ElementClass, LinePrimitive, Primitive, RectPrimitive,
    Rotation, Shape, Stroke, TextAnchor, TextPrimitive,
};
use crate::Result;
use dimplot_core::{PlotDocument, Statistics, group_document};
use rand::Rng;
use serde::{Deserialize, Serialize};

const INK: &str = "black";
const AXIS_TICK_SIZE: f64 = 6.0;
const AXIS_TICK_PADDING: f64 = 3.0;

/// What a successful render put on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderOutcome {
    /// Axes and one box per category, in plot order.
    Plotted { categories: Vec<CategorySummary> },
    /// No category had observations; only the title was drawn.
    TitleOnly,
}

impl RenderOutcome {
    pub fn categories(&self) -> &[CategorySummary] {
        match self {
            Self::Plotted { categories } => categories,
            Self::TitleOnly => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub color: String,
    pub stats: Statistics,
}

/// Clears `surface` and draws `document` on it.
///
/// On a normalization error the surface is left empty: nothing is drawn, not even the title.
pub fn render_document<S, R>(
    surface: &mut S,
    document: &PlotDocument,
    config: &PlotConfig,
    rng: &mut R,
) -> Result<RenderOutcome>
where
    S: DrawingSurface + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    surface.clear();

    let groups = group_document(document)?;
    let layout = layout_box_plot(
        &document.title,
        &groups,
        surface.width(),
        surface.height(),
        config,
        rng,
    )?;
    draw_layout(surface, &layout, config);

    if layout.axes.is_none() {
        return Ok(RenderOutcome::TitleOnly);
    }
    Ok(RenderOutcome::Plotted {
        categories: layout
            .boxes
            .iter()
            .map(|b| CategorySummary {
                name: b.name.clone(),
                color: b.color.clone(),
                stats: b.stats,
            })
            .collect(),
    })
}

/// Appends the primitives for `layout` to `surface`. Does not clear it first.
pub fn draw_layout<S>(surface: &mut S, layout: &BoxPlotLayout, config: &PlotConfig)
where
    S: DrawingSurface + ?Sized,
{
    if let Some(fill) = config.background.as_deref() {
        surface.append(Primitive::new(
            ElementClass::Background,
            Shape::Rect(RectPrimitive {
                x: 0.0,
                y: 0.0,
                width: layout.canvas_width,
                height: layout.canvas_height,
                fill: Some(fill.to_string()),
                stroke: None,
            }),
        ));
    }

    surface.append(Primitive::new(
        ElementClass::Title,
        Shape::Text(TextPrimitive {
            x: layout.title.x,
            y: layout.title.y,
            text: layout.title.text.clone(),
            font_size: config.title_font_size,
            font_weight: Some("bold".to_string()),
            anchor: TextAnchor::Middle,
            dy_em: 0.0,
            rotation: None,
            fill: INK.to_string(),
        }),
    ));

    let Some(axes) = layout.axes.as_ref() else {
        return;
    };

    let mut pen = Pen {
        surface,
        ox: layout.origin.x,
        oy: layout.origin.y,
    };
    pen.category_axis(axes, layout.plot_width, layout.plot_height, config);
    pen.value_axis(axes, layout.plot_height, config);
    for b in &layout.boxes {
        pen.box_and_points(b, config);
    }
}

/// Translates plot-area coordinates to canvas coordinates while appending.
struct Pen<'a, S: ?Sized> {
    surface: &'a mut S,
    ox: f64,
    oy: f64,
}

impl<S: DrawingSurface + ?Sized> Pen<'_, S> {
    fn line(
        &mut self,
        class: ElementClass,
        category: Option<&str>,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
        stroke: Stroke,
    ) {
        let p = Primitive::new(
            class,
            Shape::Line(LinePrimitive {
                x1: self.ox + x1,
                y1: self.oy + y1,
                x2: self.ox + x2,
                y2: self.oy + y2,
                stroke,
            }),
        );
        self.surface.append(match category {
            Some(name) => p.for_category(name),
            None => p,
        });
    }

    fn category_axis(&mut self, axes: &AxesLayout, width: f64, height: f64, config: &PlotConfig) {
        let stroke = Stroke::new(INK, 1.0);
        self.line(
            ElementClass::AxisDomain,
            None,
            (0.0, height),
            (width, height),
            stroke.clone(),
        );
        for tick in &axes.x_ticks {
            self.line(
                ElementClass::AxisTick,
                Some(tick.label.as_str()),
                (tick.offset, height),
                (tick.offset, height + AXIS_TICK_SIZE),
                stroke.clone(),
            );
            let (x, y) = (self.ox + tick.offset, self.oy + height);
            self.surface.append(
                Primitive::new(
                    ElementClass::AxisLabel,
                    Shape::Text(TextPrimitive {
                        x,
                        y: y + AXIS_TICK_SIZE + AXIS_TICK_PADDING,
                        text: tick.label.clone(),
                        font_size: config.category_label_font_size,
                        font_weight: None,
                        anchor: TextAnchor::End,
                        dy_em: 0.71,
                        rotation: Some(Rotation {
                            angle: config.category_label_rotation,
                            cx: x,
                            cy: y,
                        }),
                        fill: INK.to_string(),
                    }),
                )
                .for_category(&tick.label),
            );
        }
    }

    fn value_axis(&mut self, axes: &AxesLayout, height: f64, config: &PlotConfig) {
        let stroke = Stroke::new(INK, 1.0);
        self.line(
            ElementClass::AxisDomain,
            None,
            (0.0, 0.0),
            (0.0, height),
            stroke.clone(),
        );
        for tick in &axes.y_ticks {
            self.line(
                ElementClass::AxisTick,
                None,
                (-AXIS_TICK_SIZE, tick.offset),
                (0.0, tick.offset),
                stroke.clone(),
            );
            self.surface.append(Primitive::new(
                ElementClass::AxisLabel,
                Shape::Text(TextPrimitive {
                    x: self.ox - AXIS_TICK_SIZE - AXIS_TICK_PADDING,
                    y: self.oy + tick.offset,
                    text: tick.label.clone(),
                    font_size: config.axis_font_size,
                    font_weight: None,
                    anchor: TextAnchor::End,
                    dy_em: 0.32,
                    rotation: None,
                    fill: INK.to_string(),
                }),
            ));
        }
    }

    fn box_and_points(&mut self, b: &BoxLayout, config: &PlotConfig) {
        let name = Some(b.name.as_str());

        self.surface.append(
            Primitive::new(
                ElementClass::Box,
                Shape::Rect(RectPrimitive {
                    x: self.ox + b.x,
                    y: self.oy + b.box_top,
                    width: b.width,
                    height: b.box_bottom - b.box_top,
                    fill: None,
                    stroke: Some(Stroke::new(b.color.clone(), config.box_stroke_width)),
                }),
            )
            .for_category(&b.name),
        );
        self.line(
            ElementClass::Median,
            name,
            (b.x, b.median_y),
            (b.x + b.width, b.median_y),
            Stroke::new(b.color.clone(), config.median_stroke_width),
        );

        let whisker = Stroke::new(b.color.clone(), config.whisker_stroke_width);
        self.line(
            ElementClass::Whisker,
            name,
            (b.mid, b.box_bottom),
            (b.mid, b.min_y),
            whisker.clone(),
        );
        self.line(
            ElementClass::Whisker,
            name,
            (b.mid, b.box_top),
            (b.mid, b.max_y),
            whisker.clone(),
        );
        for y in [b.min_y, b.max_y] {
            self.line(
                ElementClass::WhiskerCap,
                name,
                (b.mid - b.cap_half_width, y),
                (b.mid + b.cap_half_width, y),
                whisker.clone(),
            );
        }

        for p in &b.points {
            self.surface.append(
                Primitive::new(
                    ElementClass::Point,
                    Shape::Circle(CirclePrimitive {
                        cx: self.ox + p.x,
                        cy: self.oy + p.y,
                        r: config.point_radius,
                        fill: b.color.clone(),
                        opacity: config.point_opacity,
                    }),
                )
                .for_category(&b.name),
            );
        }
    }
}
