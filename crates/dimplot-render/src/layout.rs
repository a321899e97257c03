use crate::config::PlotConfig;
use crate::model::{
    AxesLayout, AxisTick, BoxLayout, BoxPlotLayout, LayoutPoint, PointLayout, TitleLayout,
};
use crate::scale::{BandScale, LinearScale, padded_domain};
use crate::{Error, Result};
use dimplot_core::CategoryGroup;
use rand::Rng;

/// Position scale over category names and value scale over all observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    pub x: BandScale,
    pub y: LinearScale,
}

/// Builds both scales for a `plot_width` x `plot_height` plot area.
///
/// Fails with `EmptyDataset` when `groups` is empty.
pub fn build_scales(
    groups: &[CategoryGroup],
    plot_width: f64,
    plot_height: f64,
    config: &PlotConfig,
) -> Result<Scales> {
    if groups.is_empty() {
        return Err(dimplot_core::Error::EmptyDataset.into());
    }

    let domain = groups.iter().map(|g| g.name.clone()).collect();
    let x = BandScale::new(domain, (0.0, plot_width), config.band_padding);

    let (min, max) = groups
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), g| {
            (lo.min(g.stats.min), hi.max(g.stats.max))
        });
    let y = LinearScale::new(
        padded_domain(min, max, config.value_padding),
        (plot_height, 0.0),
    );

    Ok(Scales { x, y })
}

/// Computes the full box-plot geometry for a `canvas_width` x `canvas_height` canvas.
///
/// An empty `groups` slice is not an error: the layout then carries only the title.
pub fn layout_box_plot<R: Rng + ?Sized>(
    title: &str,
    groups: &[CategoryGroup],
    canvas_width: f64,
    canvas_height: f64,
    config: &PlotConfig,
    rng: &mut R,
) -> Result<BoxPlotLayout> {
    let (plot_width, plot_height) = config.plot_area(canvas_width, canvas_height)?;

    let mut layout = BoxPlotLayout {
        canvas_width,
        canvas_height,
        origin: LayoutPoint {
            x: config.margin.left,
            y: config.margin.top,
        },
        plot_width,
        plot_height,
        title: TitleLayout {
            text: title.to_string(),
            x: canvas_width / 2.0,
            y: config.margin.top / 2.0,
        },
        axes: None,
        boxes: Vec::new(),
    };

    let scales = match build_scales(groups, plot_width, plot_height, config) {
        Ok(scales) => scales,
        Err(err) if err.is_empty_dataset() => {
            tracing::warn!(title, "no category has observations; drawing the title only");
            return Ok(layout);
        }
        Err(err) => return Err(err),
    };

    let bandwidth = scales.x.bandwidth();
    layout.axes = Some(AxesLayout {
        value_domain: scales.y.domain(),
        bandwidth,
        x_ticks: groups
            .iter()
            .filter_map(|g| {
                Some(AxisTick {
                    label: g.name.clone(),
                    offset: scales.x.center(&g.name)?,
                })
            })
            .collect(),
        y_ticks: scales
            .y
            .tick_labels(config.y_tick_count)
            .into_iter()
            .map(|(value, label)| AxisTick {
                label,
                offset: scales.y.map(value),
            })
            .collect(),
    });

    for group in groups {
        layout.boxes.push(layout_box(group, &scales, config, rng)?);
    }

    tracing::debug!(
        categories = layout.boxes.len(),
        bandwidth,
        "laid out box plot"
    );
    Ok(layout)
}

fn layout_box<R: Rng + ?Sized>(
    group: &CategoryGroup,
    scales: &Scales,
    config: &PlotConfig,
    rng: &mut R,
) -> Result<BoxLayout> {
    let Some(x) = scales.x.position(&group.name) else {
        return Err(Error::InvalidConfig {
            message: format!("category {:?} is missing from the band scale", group.name),
        });
    };
    let width = scales.x.bandwidth();
    let mid = x + width / 2.0;
    let y = &scales.y;
    let stats = group.stats;

    let jitter_width = width * config.jitter_fraction;
    let jitter_start = x + (width - jitter_width) / 2.0;
    let points = group
        .values
        .iter()
        .map(|&value| PointLayout {
            x: jitter_start + rng.gen_range(0.0..1.0) * jitter_width,
            y: y.map(value),
            value,
        })
        .collect();

    Ok(BoxLayout {
        name: group.name.clone(),
        color: group.color.clone(),
        x,
        mid,
        width,
        box_top: y.map(stats.q3),
        box_bottom: y.map(stats.q1),
        median_y: y.map(stats.median),
        min_y: y.map(stats.min),
        max_y: y.map(stats.max),
        cap_half_width: width * config.cap_width_fraction / 2.0,
        jitter_start,
        jitter_width,
        stats,
        points,
    })
}
