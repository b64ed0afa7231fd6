//! Domain models for the floor plan service.

pub mod floor_plan;
pub mod generation;
pub mod provenance;

pub use floor_plan::{FloorPlanRequest, REQUIRED_FIELDS};
pub use generation::{GenerationEnvelope, GenerationResult};
pub use provenance::{ProvenanceRecord, TIMESTAMP_FORMAT};
