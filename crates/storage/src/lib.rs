//! Storage access for the order services.
//!
//! The PostgreSQL/PostGIS schema is owned by the order-processing backend
//! and the boundary loaders; this crate only reads from it.

pub mod catalog;
pub mod models;

pub use catalog::{Catalog, DivisionFilter};
pub use models::{
    AdministrativeDivisionRecord, DatasetRepresentationRecord, OrderItemRecord, OrderRecord,
    RegionRecord,
};
