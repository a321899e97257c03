#![forbid(unsafe_code)]

//! Box-plot document model and statistics (headless).
//!
//! Design goals:
//! - one pure pipeline per dataset: normalize, group, summarize
//! - deterministic, testable outputs (category order, quartiles)
//! - no drawing concerns; see `dimplot-render` for scales and SVG output

pub mod dataset;
pub mod document;
pub mod error;
pub mod normalize;
pub mod palette;
pub mod stats;

pub use dataset::{Cluster, DatasetBundle, PointsDataset, document_for_dimension};
pub use document::{CategorySpec, PlotDocument};
pub use error::{Error, Result};
pub use normalize::{
    CategoryGroup, Observation, ResolvedCategory, flatten, group, group_document, normalize,
};
pub use stats::{Statistics, quantile_sorted};

#[cfg(test)]
mod tests;
