#![forbid(unsafe_code)]

//! `dimplot` is a headless renderer for categorical box plots with jittered points.
//!
//! A host hands over a JSON document (title, flat values, categories referencing values by
//! index); `dimplot` groups the values, computes quartiles, builds the scales and draws the plot
//! onto a drawing surface.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`dimplot::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use dimplot_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use dimplot_render::model::BoxPlotLayout;
    pub use dimplot_render::surface::RecordingSurface;
    pub use dimplot_render::{
        CategorySummary, DrawingSurface, ElementClass, Margin, PlotConfig, Primitive,
        RenderOutcome, SvgSurface,
    };

    pub mod bridge;
    #[cfg(feature = "raster")]
    pub mod raster;

    use dimplot_core::PlotDocument;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] dimplot_core::Error),
        #[error(transparent)]
        Render(#[from] dimplot_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Jitter generator for one render: seeded from `jitterSeed` when set, from OS entropy
    /// otherwise.
    pub fn rng_for(config: &PlotConfig) -> StdRng {
        match config.jitter_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Clears `surface` and draws `document` on it.
    ///
    /// The surface is always cleared first. If the document references values that do not
    /// exist, the error is returned and the surface stays empty.
    pub fn render<S>(
        surface: &mut S,
        document: &PlotDocument,
        config: &PlotConfig,
    ) -> Result<RenderOutcome>
    where
        S: DrawingSurface + ?Sized,
    {
        render_with_rng(surface, document, config, &mut rng_for(config))
    }

    /// Like [`render`], with the caller supplying the jitter generator.
    pub fn render_with_rng<S, R>(
        surface: &mut S,
        document: &PlotDocument,
        config: &PlotConfig,
        rng: &mut R,
    ) -> Result<RenderOutcome>
    where
        S: DrawingSurface + ?Sized,
        R: Rng + ?Sized,
    {
        let outcome = dimplot_render::render_document(surface, document, config, rng)?;
        tracing::debug!(
            title = %document.title,
            categories = outcome.categories().len(),
            "rendered box plot"
        );
        Ok(outcome)
    }

    /// Synchronous layout helper (executor-free).
    pub fn layout_sync(document: &PlotDocument, config: &PlotConfig) -> Result<BoxPlotLayout> {
        config.validate()?;
        let groups = dimplot_core::group_document(document)?;
        Ok(dimplot_render::layout_box_plot(
            &document.title,
            &groups,
            config.width,
            config.height,
            config,
            &mut rng_for(config),
        )?)
    }

    pub async fn layout(document: &PlotDocument, config: &PlotConfig) -> Result<BoxPlotLayout> {
        layout_sync(document, config)
    }

    /// Synchronous SVG render helper (executor-free).
    pub fn render_svg_sync(document: &PlotDocument, config: &PlotConfig) -> Result<String> {
        let mut surface =
            SvgSurface::new(config.width, config.height).with_font_family(&config.font_family);
        render(&mut surface, document, config)?;
        Ok(surface.to_svg_string())
    }

    pub async fn render_svg(document: &PlotDocument, config: &PlotConfig) -> Result<String> {
        render_svg_sync(document, config)
    }

    /// Convenience wrapper that bundles a [`PlotConfig`] for headless rendering of JSON
    /// documents.
    ///
    /// It stays runtime-agnostic: all work is CPU-bound and does not perform I/O.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub config: PlotConfig,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_config(mut self, config: PlotConfig) -> Self {
            self.config = config;
            self
        }

        pub fn with_seed(mut self, seed: u64) -> Self {
            self.config.jitter_seed = Some(seed);
            self
        }

        pub fn parse_document_sync(&self, text: &str) -> Result<PlotDocument> {
            Ok(PlotDocument::from_json_str(text)?)
        }

        pub fn layout_sync(&self, text: &str) -> Result<BoxPlotLayout> {
            layout_sync(&self.parse_document_sync(text)?, &self.config)
        }

        pub fn render_svg_sync(&self, text: &str) -> Result<String> {
            render_svg_sync(&self.parse_document_sync(text)?, &self.config)
        }
    }
}
