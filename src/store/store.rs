use std::collections::HashMap;

use thiserror::Error;

use crate::Point;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("point not found: {0}")]
    NotFound(String),
}

/// Named points held in load order, with a name index for lookups.
///
/// Names are unique and case-sensitive. Inserting a name that is already
/// present replaces the stored coordinates in place.
#[derive(Clone, Debug, Default)]
pub struct PointStore {
    points: Vec<Point>,
    name_index: HashMap<String, usize>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut store = PointStore::new();
        for point in points {
            store.insert(point);
        }
        store
    }

    /// Inserts `point`, returning the entry it replaced if the name was taken.
    pub fn insert(&mut self, point: Point) -> Option<Point> {
        match self.name_index.get(&point.name) {
            Some(&idx) => Some(std::mem::replace(&mut self.points[idx], point)),
            None => {
                self.name_index.insert(point.name.clone(), self.points.len());
                self.points.push(point);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&Point, StoreError> {
        self.name_index
            .get(name)
            .map(|&idx| &self.points[idx])
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}
