//! HTTP request handlers for the order API.

pub mod admin;
pub mod datasets;
pub mod divisions;
pub mod health;
pub mod orders;
pub mod regions;
