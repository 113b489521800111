pub mod data;
pub mod metric;
pub mod query;
pub mod session;
pub mod store;

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub name: String,
    /// North-south ordinate (latitude).
    pub north: f64,
    /// East-west ordinate (longitude).
    pub east: f64,
}

impl Point {
    pub fn new(name: impl Into<String>, north: f64, east: f64) -> Self {
        Point {
            name: name.into(),
            north,
            east,
        }
    }

    /// Absolute per-axis deltas `(|dnorth|, |deast|)` to `other`.
    pub fn delta(&self, other: &Point) -> (f64, f64) {
        (
            (self.north - other.north).abs(),
            (self.east - other.east).abs(),
        )
    }

    pub fn is_north_of(&self, other: &Point) -> bool {
        self.north > other.north
    }
}
