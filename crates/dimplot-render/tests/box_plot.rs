use dimplot_core::{Error as CoreError, PlotDocument, group_document};
use dimplot_render::surface::{RecordingSurface, Shape};
use dimplot_render::{
    DrawingSurface, ElementClass, Error, PlotConfig, RenderOutcome, SvgSurface, build_scales,
    render_document,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

fn doc(value: serde_json::Value) -> PlotDocument {
    PlotDocument::from_json_value(&value).unwrap()
}

fn render(surface: &mut RecordingSurface, d: &PlotDocument) -> dimplot_render::Result<RenderOutcome> {
    render_document(surface, d, &PlotConfig::default(), &mut StdRng::seed_from_u64(11))
}

fn categories_of(surface: &RecordingSurface, class: ElementClass) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for p in &surface.primitives {
        if p.class != class {
            continue;
        }
        if let Some(name) = p.category.as_deref() {
            if out.last().map(String::as_str) != Some(name) {
                out.push(name.to_string());
            }
        }
    }
    out
}

#[test]
fn encounter_order_beats_declaration_order() {
    let d = doc(json!({
        "title": "order",
        "values": [1, 2, 3, 4],
        "categories": [
            { "name": "B", "indices": [2, 3] },
            { "name": "A", "indices": [0, 1] }
        ]
    }));
    let mut surface = RecordingSurface::new(800.0, 500.0);
    let outcome = render(&mut surface, &d).unwrap();

    let names: Vec<&str> = outcome
        .categories()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(categories_of(&surface, ElementClass::Box), ["A", "B"]);

    // Colors stay attached to the declaration, not the plot slot.
    assert_eq!(outcome.categories()[0].color, "#ff7f0e");
    assert_eq!(outcome.categories()[1].color, "#1f77b4");
}

#[test]
fn empty_category_is_not_plotted() {
    let d = doc(json!({
        "title": "gaps",
        "values": [1, 2, 3],
        "categories": [
            { "name": "full", "indices": [0, 1, 2] },
            { "name": "empty", "indices": [] }
        ]
    }));
    let groups = group_document(&d).unwrap();
    let scales = build_scales(&groups, 720.0, 380.0, &PlotConfig::default()).unwrap();
    assert_eq!(scales.x.domain(), ["full".to_string()]);

    let mut surface = RecordingSurface::new(800.0, 500.0);
    render(&mut surface, &d).unwrap();
    assert!(
        surface
            .primitives
            .iter()
            .all(|p| p.category.as_deref() != Some("empty"))
    );
}

#[test]
fn out_of_range_index_draws_nothing() {
    let d = doc(json!({
        "title": "broken",
        "values": [1, 2, 3, 4, 5],
        "categories": [{ "name": "a", "indices": [0, 100] }]
    }));
    let mut surface = RecordingSurface::new(800.0, 500.0);
    let err = render(&mut surface, &d).unwrap_err();

    assert!(matches!(
        err,
        Error::Core(CoreError::IndexOutOfRange { index: 100, len: 5, .. })
    ));
    assert!(surface.primitives.is_empty());
}

#[test]
fn error_clears_a_previous_plot() {
    let good = doc(json!({
        "title": "good",
        "values": [1, 2],
        "categories": [{ "name": "a", "indices": [0, 1] }]
    }));
    let bad = doc(json!({
        "title": "bad",
        "values": [1, 2],
        "categories": [{ "name": "a", "indices": [-1] }]
    }));
    let mut surface = RecordingSurface::new(800.0, 500.0);
    render(&mut surface, &good).unwrap();
    assert!(!surface.primitives.is_empty());

    render(&mut surface, &bad).unwrap_err();
    assert!(surface.primitives.is_empty());
}

#[test]
fn value_domain_is_padded_by_a_tenth() {
    let d = doc(json!({
        "title": "pad",
        "values": [10, 14, 20, 12],
        "categories": [
            { "name": "x", "indices": [0, 1] },
            { "name": "y", "indices": [2, 3] }
        ]
    }));
    let groups = group_document(&d).unwrap();
    let scales = build_scales(&groups, 720.0, 380.0, &PlotConfig::default()).unwrap();
    assert_eq!(scales.y.domain(), (9.0, 21.0));
    assert_eq!(scales.y.map(9.0), 380.0);
    assert_eq!(scales.y.map(21.0), 0.0);
}

#[test]
fn second_render_replaces_the_first() {
    let first = doc(json!({
        "title": "first",
        "values": [1, 2, 3],
        "categories": [{ "name": "one", "indices": [0, 1, 2] }]
    }));
    let second = doc(json!({
        "title": "second",
        "values": [5, 6],
        "categories": [{ "name": "two", "indices": [0, 1] }]
    }));

    let mut surface = RecordingSurface::new(800.0, 500.0);
    render(&mut surface, &first).unwrap();
    render(&mut surface, &second).unwrap();

    let mut fresh = RecordingSurface::new(800.0, 500.0);
    render(&mut fresh, &second).unwrap();

    assert_eq!(surface.primitives, fresh.primitives);
    assert!(
        surface
            .primitives
            .iter()
            .all(|p| p.category.as_deref() != Some("one"))
    );
    let titles: Vec<_> = surface
        .primitives
        .iter()
        .filter_map(|p| match &p.shape {
            Shape::Text(t) if p.class == ElementClass::Title => Some(t.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(titles, ["second"]);
}

#[test]
fn no_observations_draws_title_only() {
    let d = doc(json!({
        "title": "nothing here",
        "values": [1, 2],
        "categories": [{ "name": "a", "indices": [] }]
    }));
    let mut surface = RecordingSurface::new(800.0, 500.0);
    let outcome = render(&mut surface, &d).unwrap();
    assert_eq!(outcome, RenderOutcome::TitleOnly);
    assert_eq!(surface.primitives.len(), 1);
    assert_eq!(surface.primitives[0].class, ElementClass::Title);
}

#[test]
fn points_land_inside_their_band() {
    let values: Vec<f64> = (0..60).map(|i| f64::from(i % 7)).collect();
    let d = doc(json!({
        "title": "jitter",
        "values": values,
        "categories": [
            { "name": "p", "indices": (0..30).collect::<Vec<i64>>() },
            { "name": "q", "indices": (30..60).collect::<Vec<i64>>() }
        ]
    }));
    let cfg = PlotConfig::default();
    let groups = group_document(&d).unwrap();
    let scales = build_scales(&groups, 720.0, 380.0, &cfg).unwrap();
    let bw = scales.x.bandwidth();

    let mut surface = RecordingSurface::new(800.0, 500.0);
    render_document(&mut surface, &d, &cfg, &mut StdRng::seed_from_u64(5)).unwrap();

    for p in &surface.primitives {
        let Shape::Circle(c) = &p.shape else {
            continue;
        };
        let name = p.category.as_deref().unwrap();
        let start = cfg.margin.left + scales.x.position(name).unwrap() + bw * 0.35;
        assert!(
            c.cx >= start - 1e-9 && c.cx <= start + bw * 0.3 + 1e-9,
            "{name}: {}",
            c.cx
        );
        assert_eq!(c.r, 2.0);
        assert_eq!(c.opacity, 0.5);
    }
}

#[test]
fn svg_surface_renders_a_document() {
    let d = doc(json!({
        "title": "Petal <length>",
        "values": [1.4, 1.3, 4.7, 4.5, 6.0],
        "categories": [
            { "name": "setosa", "indices": [0, 1] },
            { "name": "versicolor", "indices": [2, 3] },
            { "name": "virginica", "indices": [4], "color": "purple" }
        ]
    }));
    let mut surface = SvgSurface::new(800.0, 500.0);
    render_document(
        &mut surface,
        &d,
        &PlotConfig::default(),
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();

    assert_eq!(surface.width(), 800.0);
    let svg = surface.to_svg_string();
    assert!(svg.contains("Petal &lt;length&gt;"));
    assert_eq!(svg.matches(r#"<rect class="box""#).count(), 3);
    assert_eq!(svg.matches(r#"<circle class="point""#).count(), 5);
    assert!(svg.contains(r#"data-category="virginica""#));
    assert!(svg.contains(r#"stroke="purple""#));
    assert!(svg.contains("rotate(-45,"));
}

fn coordinates(surface: &RecordingSurface) -> Vec<f64> {
    surface
        .primitives
        .iter()
        .flat_map(|p| match &p.shape {
            Shape::Rect(r) => vec![r.x, r.y, r.width, r.height],
            Shape::Line(l) => vec![l.x1, l.y1, l.x2, l.y2],
            Shape::Text(t) => vec![t.x, t.y],
            Shape::Circle(c) => vec![c.cx, c.cy],
        })
        .collect()
}

#[test]
fn subnormal_values_render_without_value_ticks() {
    let d = doc(json!({
        "title": "tiny",
        "values": [1e-320, 2e-320, 1.5e-320],
        "categories": [{ "name": "a", "indices": [0, 1, 2] }]
    }));
    let mut surface = RecordingSurface::new(800.0, 500.0);
    render(&mut surface, &d).unwrap();

    assert!(coordinates(&surface).iter().all(|v| v.is_finite()));
    let count = |class: ElementClass| {
        surface
            .primitives
            .iter()
            .filter(|p| p.class == class)
            .count()
    };
    assert_eq!(count(ElementClass::Point), 3);
    // Only the category axis has a tick.
    assert_eq!(count(ElementClass::AxisTick), 1);
}

#[test]
fn values_spanning_the_f64_range_stay_on_the_canvas() {
    let d = doc(json!({
        "title": "wide",
        "values": [-1.7e308, 1.7e308, 0.0],
        "categories": [{ "name": "a", "indices": [0, 1, 2] }]
    }));
    let mut surface = RecordingSurface::new(800.0, 500.0);
    let outcome = render(&mut surface, &d).unwrap();
    assert_eq!(outcome.categories()[0].stats.median, 0.0);

    let coords = coordinates(&surface);
    assert!(coords.iter().all(|v| v.is_finite()));

    let (top, bottom) = surface
        .primitives
        .iter()
        .filter(|p| p.class == ElementClass::Point)
        .filter_map(|p| match &p.shape {
            Shape::Circle(c) => Some(c.cy),
            _ => None,
        })
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
    assert!(bottom - top > 100.0);
}
