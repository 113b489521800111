pub mod store;

pub use store::{PointStore, StoreError};
