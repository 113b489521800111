//! The fixed set of planar distance metrics a radius query can use.

use std::fmt;

use serde::Serialize;

use crate::Point;

/// Distance metric over per-axis deltas, selected by a small integer index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// L2: `sqrt(dx^2 + dy^2)`
    Euclidean,
    /// L-infinity: `max(dx, dy)`
    Chebyshev,
    /// L1: `dx + dy`
    Manhattan,
}

impl Metric {
    /// Every metric, positioned at its selection index.
    pub const ALL: [Metric; 3] = [Metric::Euclidean, Metric::Chebyshev, Metric::Manhattan];

    pub fn from_index(index: i64) -> Option<Metric> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(self) -> usize {
        match self {
            Metric::Euclidean => 0,
            Metric::Chebyshev => 1,
            Metric::Manhattan => 2,
        }
    }

    /// Combines two non-negative axis deltas into a distance.
    #[inline]
    pub fn distance(self, dx: f64, dy: f64) -> f64 {
        let (dx, dy) = (dx.abs(), dy.abs());
        match self {
            Metric::Euclidean => (dx * dx + dy * dy).sqrt(),
            Metric::Chebyshev => dx.max(dy),
            Metric::Manhattan => dx + dy,
        }
    }

    pub fn between(self, a: &Point, b: &Point) -> f64 {
        let (dx, dy) = a.delta(b);
        self.distance(dx, dy)
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Euclidean => "L2, Euclidean distance",
            Metric::Chebyshev => "Linf, Chebyshev distance",
            Metric::Manhattan => "L1, Manhattan distance",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
