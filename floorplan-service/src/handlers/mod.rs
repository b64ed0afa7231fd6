//! HTTP handlers for the floor plan service.

pub mod floorplan;
pub mod health;

pub use floorplan::generate_floorplan;
pub use health::{api_test, health_check};
