//! The input document delivered by the host for each render.
//!
//! Two JSON shapes are accepted:
//! - descriptor form: `categories` is a list of `{ name, indices, color }` objects
//! - id form: `categories` is a list of names and `categoryIds` assigns each value to one of them
//!
//! Both are normalized into [`PlotDocument`], which always carries descriptors.

use crate::error::{Error, Result};
use crate::palette;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    /// Positions into [`PlotDocument::values`]. Any JSON integer is accepted, negative or beyond
    /// `i64::MAX`, so that a bad entry is reported as out of range instead of failing
    /// deserialization.
    #[serde(deserialize_with = "deserialize_indices")]
    pub indices: Vec<i128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

struct Index(i128);

impl<'de> Deserialize<'de> for Index {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(IndexVisitor)
    }
}

struct IndexVisitor;

impl serde::de::Visitor<'_> for IndexVisitor {
    type Value = Index;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("an integer index")
    }

    fn visit_i64<E>(self, v: i64) -> std::result::Result<Index, E>
    where
        E: serde::de::Error,
    {
        Ok(Index(i128::from(v)))
    }

    fn visit_u64<E>(self, v: u64) -> std::result::Result<Index, E>
    where
        E: serde::de::Error,
    {
        Ok(Index(i128::from(v)))
    }
}

fn deserialize_indices<'de, D>(deserializer: D) -> std::result::Result<Vec<i128>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Index>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|Index(i)| i).collect())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct PlotDocument {
    pub title: String,
    pub values: Vec<f64>,
    pub categories: Vec<CategorySpec>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    title: String,
    values: Vec<f64>,
    categories: Vec<RawCategory>,
    #[serde(rename = "categoryIds", default)]
    category_ids: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Spec(CategorySpec),
    Name(String),
}

/// Shape violations found after deserialization; surfaced through serde as a custom error.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct ShapeError(String);

impl TryFrom<RawDocument> for PlotDocument {
    type Error = ShapeError;

    fn try_from(raw: RawDocument) -> std::result::Result<Self, ShapeError> {
        let RawDocument {
            title,
            values,
            categories,
            category_ids,
        } = raw;

        let all_names = categories
            .iter()
            .all(|c| matches!(c, RawCategory::Name(_)));
        let all_specs = categories
            .iter()
            .all(|c| matches!(c, RawCategory::Spec(_)));

        let categories = if categories.is_empty() {
            if category_ids.as_ref().is_some_and(|ids| ids.iter().any(|&id| id >= 0)) {
                return Err(ShapeError::new(
                    "categoryIds references categories, but none are declared",
                ));
            }
            Vec::new()
        } else if all_specs {
            if category_ids.is_some() {
                return Err(ShapeError::new(
                    "categoryIds is only valid when categories are plain names",
                ));
            }
            categories
                .into_iter()
                .filter_map(|c| match c {
                    RawCategory::Spec(spec) => Some(spec),
                    RawCategory::Name(_) => None,
                })
                .collect()
        } else if all_names {
            let Some(ids) = category_ids else {
                return Err(ShapeError::new(
                    "categories given as names require a categoryIds array",
                ));
            };
            let names = categories
                .into_iter()
                .filter_map(|c| match c {
                    RawCategory::Name(name) => Some(name),
                    RawCategory::Spec(_) => None,
                })
                .collect::<Vec<_>>();
            categories_from_ids(names, &ids, values.len())?
        } else {
            return Err(ShapeError::new(
                "categories mixes plain names and category objects",
            ));
        };

        let doc = Self {
            title,
            values,
            categories,
        };
        doc.check_unique_names()?;
        Ok(doc)
    }
}

impl ShapeError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

fn categories_from_ids(
    names: Vec<String>,
    ids: &[i64],
    value_count: usize,
) -> std::result::Result<Vec<CategorySpec>, ShapeError> {
    if ids.len() != value_count {
        return Err(ShapeError::new(format!(
            "categoryIds has length {}, but values has length {value_count}",
            ids.len()
        )));
    }

    let mut out: Vec<CategorySpec> = names
        .into_iter()
        .map(|name| CategorySpec {
            name,
            indices: Vec::new(),
            color: None,
        })
        .collect();

    for (i, &id) in ids.iter().enumerate() {
        // Negative ids mark values without a category.
        if id < 0 {
            continue;
        }
        let Some(cat) = usize::try_from(id).ok().and_then(|id| out.get_mut(id)) else {
            return Err(ShapeError::new(format!(
                "categoryIds[{i}] = {id} does not name a declared category"
            )));
        };
        cat.indices.push(i as i128);
    }

    Ok(out)
}

impl PlotDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_value(value: &serde_json::Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Stroke/fill color for the category declared at `position`.
    ///
    /// Categories without a usable color fall back to the d3 `schemeCategory10` palette.
    pub fn color_of(&self, position: usize) -> String {
        self.categories
            .get(position)
            .and_then(|c| c.color.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| palette::fallback_color(position).to_string())
    }

    /// Applies the checks that deserialization performs to a document built in code.
    pub fn validated(self) -> Result<Self> {
        self.check_unique_names()
            .map_err(|err| Error::malformed(err.to_string()))?;
        Ok(self)
    }

    fn check_unique_names(&self) -> std::result::Result<(), ShapeError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.categories.len());
        for cat in &self.categories {
            if !seen.insert(cat.name.as_str()) {
                return Err(ShapeError::new(format!(
                    "duplicate category name {:?}",
                    cat.name
                )));
            }
        }
        Ok(())
    }
}
