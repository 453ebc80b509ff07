//! Day filter and distance sort over the loaded centers.
//!
//! The view is recomputed from scratch on every filter or location change.
//! Distances are derived from the visitor's position into a [`DistanceIndex`]
//! keyed by center id, so [`CenterRecord`]s stay shared and unmodified.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::center::{CenterRecord, FilterSelection, UserLocation};

/// Center id → great-circle distance (km) from one [`UserLocation`].
///
/// Centers without coordinates have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceIndex {
    distances: HashMap<String, f64>,
}

impl DistanceIndex {
    #[must_use]
    pub fn compute(centers: &[CenterRecord], location: &UserLocation) -> Self {
        let origin = location.coordinates();
        let distances = centers
            .iter()
            .filter_map(|center| {
                let coords = center.coordinates?;
                Some((center.id.clone(), origin.distance_km_to(&coords)))
            })
            .collect();
        Self { distances }
    }

    #[must_use]
    pub fn get(&self, center_id: &str) -> Option<f64> {
        self.distances.get(center_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// One row of the view list handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewEntry<'a> {
    pub center: &'a CenterRecord,
    /// `None` when no location is set or the center has no coordinates.
    pub distance_km: Option<f64>,
}

/// Filters `centers` by `selection` and, when `distances` is present, sorts
/// the result by ascending distance.
///
/// The sort is stable; entries without a distance go last in input order.
/// Without `distances` the input order is kept.
#[must_use]
pub fn apply<'a>(
    centers: &'a [CenterRecord],
    selection: &FilterSelection,
    distances: Option<&DistanceIndex>,
) -> Vec<ViewEntry<'a>> {
    let mut view: Vec<ViewEntry<'a>> = centers
        .iter()
        .filter(|center| selection.matches(center))
        .map(|center| ViewEntry {
            center,
            distance_km: distances.and_then(|d| d.get(&center.id)),
        })
        .collect();

    if distances.is_some() {
        view.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    }

    view
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
