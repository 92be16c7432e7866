//! Common types and utilities shared by the order services.

pub mod bbox;
pub mod dataset;
pub mod error;
pub mod grid;

pub use bbox::BoundingBox;
pub use dataset::DatasetType;
pub use error::{OrderError, OrderResult};
pub use grid::{enlarge_coordinate, generate_1d_grid, snap_bbox_to_grid, snap_value};
