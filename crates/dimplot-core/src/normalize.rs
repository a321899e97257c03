//! Dataset normalization and grouping.
//!
//! `normalize` dereferences every category's indices into `values`, `flatten` turns the result
//! into one observation per (category, index) pair in dataset order, and `group` partitions the
//! observations back by category in first-encounter order.

use crate::document::PlotDocument;
use crate::error::{Error, Result};
use crate::stats::Statistics;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A category with its indices resolved into values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCategory {
    pub name: String,
    pub color: String,
    /// Declaration position in the input document.
    pub position: usize,
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation<'a> {
    pub value: f64,
    pub category: &'a str,
    /// Position of the observation in the document's `values`.
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub color: String,
    /// Observed values in dataset order.
    pub values: Vec<f64>,
    pub stats: Statistics,
}

pub fn normalize(doc: &PlotDocument) -> Result<Vec<ResolvedCategory>> {
    let len = doc.values.len();
    let mut owners: HashMap<usize, &str> = HashMap::new();
    let mut out = Vec::with_capacity(doc.categories.len());

    for (position, cat) in doc.categories.iter().enumerate() {
        let mut indices = Vec::with_capacity(cat.indices.len());
        let mut values = Vec::with_capacity(cat.indices.len());
        for &raw in &cat.indices {
            let Some(index) = usize::try_from(raw).ok().filter(|&i| i < len) else {
                return Err(Error::IndexOutOfRange {
                    category: cat.name.clone(),
                    index: raw,
                    len,
                });
            };
            if let Some(owner) = owners.insert(index, cat.name.as_str()) {
                tracing::debug!(
                    index,
                    first = owner,
                    again = cat.name.as_str(),
                    "value index listed more than once; plotting every listing"
                );
            }
            indices.push(index);
            values.push(doc.values[index]);
        }
        out.push(ResolvedCategory {
            name: cat.name.clone(),
            color: doc.color_of(position),
            position,
            indices,
            values,
        });
    }

    Ok(out)
}

/// One observation per (category, index) pair, ordered by dataset position and then by category
/// declaration order.
pub fn flatten(categories: &[ResolvedCategory]) -> Vec<Observation<'_>> {
    let mut keyed: Vec<(usize, usize, Observation<'_>)> = categories
        .iter()
        .flat_map(|cat| {
            cat.indices
                .iter()
                .zip(&cat.values)
                .map(move |(&index, &value)| {
                    (
                        index,
                        cat.position,
                        Observation {
                            value,
                            category: cat.name.as_str(),
                            index,
                        },
                    )
                })
        })
        .collect();
    keyed.sort_by_key(|(index, position, _)| (*index, *position));
    keyed.into_iter().map(|(_, _, obs)| obs).collect()
}

/// Partitions `observations` by category in first-encounter order.
///
/// Categories without observations never appear in the result.
pub fn group(
    observations: &[Observation<'_>],
    categories: &[ResolvedCategory],
) -> Vec<CategoryGroup> {
    let colors: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.name.as_str(), c.color.as_str()))
        .collect();

    let mut grouped: IndexMap<&str, Vec<f64>> = IndexMap::new();
    for obs in observations {
        grouped.entry(obs.category).or_default().push(obs.value);
    }

    grouped
        .into_iter()
        .filter_map(|(name, values)| {
            let stats = Statistics::from_values(&values)?;
            Some(CategoryGroup {
                name: name.to_string(),
                color: colors.get(name).copied().unwrap_or_default().to_string(),
                values,
                stats,
            })
        })
        .collect()
}

/// Normalizes and groups `doc` in one step.
pub fn group_document(doc: &PlotDocument) -> Result<Vec<CategoryGroup>> {
    let resolved = normalize(doc)?;
    for cat in resolved.iter().filter(|c| c.values.is_empty()) {
        tracing::warn!(category = cat.name.as_str(), "category has no observations; skipping");
    }
    let observations = flatten(&resolved);
    let groups = group(&observations, &resolved);
    tracing::debug!(
        categories = groups.len(),
        observations = observations.len(),
        "grouped plot document"
    );
    Ok(groups)
}
