//! Area hierarchy and area scoping
//!
//! The hierarchy is display metadata: it fixes the order in which areas are
//! offered and which ones are nested under a district. Queries only ever
//! see canonical area labels.

use crate::dataset::CleanDataset;
use crate::error::{ForecastError, Result};
use crate::validation::CleanRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Prefix used when rendering a child area under its district
pub const CHILD_PREFIX: &str = " • ";

/// A top-level district and its sub-areas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    /// Canonical district label
    pub name: String,
    /// Canonical labels of the sub-areas, in display order
    #[serde(default)]
    pub children: Vec<String>,
}

/// Ordered catalog of area labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaHierarchy {
    /// Label of the whole-city aggregate
    pub citywide: String,
    /// Districts in display order
    #[serde(default)]
    pub districts: Vec<District>,
}

impl AreaHierarchy {
    /// Reject empty or repeated labels
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let labels = std::iter::once(&self.citywide).chain(
            self.districts
                .iter()
                .flat_map(|d| std::iter::once(&d.name).chain(d.children.iter())),
        );

        for label in labels {
            if label.trim().is_empty() {
                return Err(ForecastError::ConfigError(
                    "Area hierarchy contains an empty label".to_string(),
                ));
            }
            if !seen.insert(label.as_str()) {
                return Err(ForecastError::ConfigError(format!(
                    "Area '{}' appears more than once in the hierarchy",
                    label
                )));
            }
        }

        Ok(())
    }

    /// Every label below the citywide entry, in display order with its depth
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.districts.iter().flat_map(|d| {
            std::iter::once((d.name.as_str(), 0))
                .chain(d.children.iter().map(|c| (c.as_str(), 1)))
        })
    }
}

/// An area that can be offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectableArea {
    /// Canonical area label
    pub label: String,
    /// 0 for the citywide entry and districts, 1 for sub-areas
    pub depth: usize,
}

impl SelectableArea {
    /// Label as rendered in a selection list
    pub fn display(&self) -> String {
        if self.depth > 0 {
            format!("{}{}", CHILD_PREFIX, self.label)
        } else {
            self.label.clone()
        }
    }
}

/// Which records a query covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaScope {
    /// Every record in the dataset
    Citywide,
    /// Records whose area equals the label
    Area(String),
}

impl AreaScope {
    /// Interpret a label, treating the citywide label as a wildcard
    pub fn from_label(label: &str, hierarchy: &AreaHierarchy) -> Self {
        if label == hierarchy.citywide {
            AreaScope::Citywide
        } else {
            AreaScope::Area(label.to_string())
        }
    }
}

/// Areas that can be queried against `dataset`, citywide first
///
/// A hierarchy label, the citywide one included, is offered only if at
/// least one record carries it.
pub fn selectable_areas(hierarchy: &AreaHierarchy, dataset: &CleanDataset) -> Vec<SelectableArea> {
    let present = dataset.areas();
    let mut areas = Vec::new();

    let citywide = std::iter::once((hierarchy.citywide.as_str(), 0));
    for (label, depth) in citywide.chain(hierarchy.entries()) {
        if present.contains(label) {
            areas.push(SelectableArea {
                label: label.to_string(),
                depth,
            });
        } else {
            log::debug!("Area '{}' has no records, not selectable", label);
        }
    }

    areas
}

/// Records covered by `scope`
pub fn scope_records<'a>(scope: &AreaScope, dataset: &'a CleanDataset) -> Vec<&'a CleanRecord> {
    match scope {
        AreaScope::Citywide => dataset.records().iter().collect(),
        AreaScope::Area(label) => dataset
            .records()
            .iter()
            .filter(|r| r.area() == label)
            .collect(),
    }
}

/// Resolve a selectable label to its records
pub fn resolve<'a>(
    label: &str,
    hierarchy: &AreaHierarchy,
    dataset: &'a CleanDataset,
) -> Result<Vec<&'a CleanRecord>> {
    let selectable = selectable_areas(hierarchy, dataset)
        .iter()
        .any(|a| a.label == label);
    if !selectable {
        return Err(ForecastError::UnknownArea(label.to_string()));
    }

    Ok(scope_records(&AreaScope::from_label(label, hierarchy), dataset))
}
