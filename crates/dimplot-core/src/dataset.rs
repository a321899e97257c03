//! Builds plot documents from a multi-dimensional points dataset and a clustering of its points.
//!
//! The host picks one dimension; each cluster becomes a category and the dimension's column
//! becomes the value array.

use crate::document::{CategorySpec, PlotDocument};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Row-major point data with one name per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsDataset {
    pub dimensions: Vec<String>,
    pub points: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub name: String,
    pub indices: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Points and clusters delivered together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetBundle {
    #[serde(flatten)]
    pub dataset: PointsDataset,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
}

impl PointsDataset {
    pub fn num_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    pub fn dimension_index(&self, name: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d == name)
    }

    /// All values of one dimension, in point order.
    pub fn column(&self, dimension: usize) -> Result<Vec<f64>> {
        if dimension >= self.num_dimensions() {
            return Err(Error::DimensionOutOfRange {
                dimension,
                count: self.num_dimensions(),
            });
        }
        self.points
            .iter()
            .enumerate()
            .map(|(row, point)| {
                point.get(dimension).copied().ok_or_else(|| {
                    Error::malformed(format!(
                        "point {row} has {} values, expected {}",
                        point.len(),
                        self.num_dimensions()
                    ))
                })
            })
            .collect()
    }
}

impl DatasetBundle {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn document(&self, dimension: usize) -> Result<PlotDocument> {
        document_for_dimension(&self.dataset, dimension, &self.clusters)
    }
}

/// Plot document for `dimension`: titled with the dimension's name, one category per cluster.
pub fn document_for_dimension(
    points: &PointsDataset,
    dimension: usize,
    clusters: &[Cluster],
) -> Result<PlotDocument> {
    let values = points.column(dimension)?;
    let categories = clusters
        .iter()
        .map(|cluster| CategorySpec {
            name: cluster.name.clone(),
            indices: cluster.indices.iter().map(|&i| i128::from(i)).collect(),
            color: cluster.color.clone(),
        })
        .collect();

    PlotDocument {
        title: points.dimensions[dimension].clone(),
        values,
        categories,
    }
    .validated()
}
