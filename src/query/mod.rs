pub mod radius;

pub use radius::{points_within_radius, Neighbour, RadiusQuery};
