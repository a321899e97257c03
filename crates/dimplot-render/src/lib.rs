#![forbid(unsafe_code)]

pub mod config;
pub mod layout;
pub mod model;
pub mod render;
pub mod scale;
pub mod surface;
pub mod svg;

pub use config::{Margin, PlotConfig};
pub use layout::{Scales, build_scales, layout_box_plot};
pub use model::BoxPlotLayout;
pub use render::{CategorySummary, RenderOutcome, draw_layout, render_document};
pub use surface::{DrawingSurface, ElementClass, Primitive};
pub use svg::SvgSurface;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] dimplot_core::Error),
    #[error("invalid plot config: {message}")]
    InvalidConfig { message: String },
    #[error("plot config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn is_empty_dataset(&self) -> bool {
        matches!(self, Self::Core(dimplot_core::Error::EmptyDataset))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
