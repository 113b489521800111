use log::debug;
use serde::Serialize;

use crate::metric::Metric;
use crate::store::{PointStore, StoreError};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Neighbour {
    pub name: String,
    pub distance: f64,
}

/// Points around a reference point, nearest first.
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusQuery {
    pub neighbours: Vec<Neighbour>,
    /// How many of `neighbours` lie strictly north of the reference point.
    pub north_count: usize,
}

impl RadiusQuery {
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.neighbours.iter().map(|n| n.name.as_str())
    }
}

/// Collects every point within `radius` (inclusive) of `reference` under
/// `metric`, excluding the reference itself.
///
/// Results are ordered by ascending distance, ties by ascending name. The
/// caller is expected to have checked `radius >= 0`.
pub fn points_within_radius(
    store: &PointStore,
    reference: &str,
    radius: f64,
    metric: Metric,
) -> Result<RadiusQuery, StoreError> {
    let origin = store.get(reference)?;

    let mut north_count = 0;
    let mut neighbours: Vec<Neighbour> = store
        .iter()
        .filter(|p| p.name != origin.name)
        .filter_map(|p| {
            let distance = metric.between(origin, p);
            if distance > radius {
                return None;
            }
            if p.is_north_of(origin) {
                north_count += 1;
            }
            Some(Neighbour {
                name: p.name.clone(),
                distance,
            })
        })
        .collect();

    neighbours.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.name.cmp(&b.name))
    });

    debug!(
        "{} point(s) within {} of {} ({}), {} to the north",
        neighbours.len(),
        radius,
        reference,
        metric,
        north_count
    );

    Ok(RadiusQuery {
        neighbours,
        north_count,
    })
}
