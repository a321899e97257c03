//! Adapter between a host application and the renderer.
//!
//! The host pushes serialized documents through [`PlotBridge::on_set_data`]. Diagnostics go
//! through a [`Logger`] handed to the bridge when it is built: a connected host receives them
//! over its own channel, otherwise they go to the local console via `tracing`.

use super::{DrawingSurface, PlotConfig, RenderOutcome, Result, render_with_rng, rng_for};
use dimplot_core::PlotDocument;
use rand::rngs::StdRng;

/// Log channel offered by a connected host.
pub trait HostLog {
    fn debug(&self, text: &str);
}

impl<F: Fn(&str)> HostLog for F {
    fn debug(&self, text: &str) {
        self(text)
    }
}

/// Where diagnostics go. Chosen once, when the bridge is constructed.
pub struct Logger {
    host: Option<Box<dyn HostLog>>,
}

impl Logger {
    /// Logs to the local console only.
    pub fn console() -> Self {
        Self { host: None }
    }

    /// Forwards every message to `host`.
    pub fn connected(host: impl HostLog + 'static) -> Self {
        Self {
            host: Some(Box::new(host)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.host.is_some()
    }

    pub fn log(&self, text: &str) {
        match &self.host {
            Some(host) => host.debug(text),
            None => tracing::info!(target: "dimplot::bridge", "{text}"),
        }
    }

    pub fn error(&self, text: &str) {
        match &self.host {
            Some(host) => host.debug(text),
            None => tracing::error!(target: "dimplot::bridge", "{text}"),
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Owns the drawing surface and re-renders it whenever the host sends new data.
#[derive(Debug)]
pub struct PlotBridge<S> {
    surface: S,
    config: PlotConfig,
    rng: StdRng,
    logger: Logger,
}

impl<S: DrawingSurface> PlotBridge<S> {
    pub fn new(surface: S, config: PlotConfig, logger: Logger) -> Self {
        let rng = rng_for(&config);
        Self {
            surface,
            config,
            rng,
            logger,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Parses `payload` as a plot document and redraws the surface with it.
    ///
    /// Failures are reported through the logger and returned. A payload that fails to parse
    /// leaves the previous plot in place; a document that fails normalization leaves the
    /// surface empty.
    pub fn on_set_data(&mut self, payload: &str) -> Result<RenderOutcome> {
        let document = match PlotDocument::from_json_str(payload) {
            Ok(document) => document,
            Err(err) => {
                self.logger.error(&format!("dimplot: could not read data: {err}"));
                return Err(err.into());
            }
        };
        self.render(&document)
    }

    pub fn render(&mut self, document: &PlotDocument) -> Result<RenderOutcome> {
        match render_with_rng(&mut self.surface, document, &self.config, &mut self.rng) {
            Ok(outcome) => {
                if matches!(outcome, RenderOutcome::TitleOnly) {
                    self.logger
                        .log("dimplot: no category has observations, drew the title only");
                }
                Ok(outcome)
            }
            Err(err) => {
                self.logger.error(&format!("dimplot: render failed: {err}"));
                Err(err)
            }
        }
    }
}
