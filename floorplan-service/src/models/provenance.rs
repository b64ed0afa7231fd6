use super::{FloorPlanRequest, GenerationResult};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Second-granularity local timestamp used in record bodies and filenames.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Durable log entry pairing one accepted request with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    pub timestamp: String,
    pub request_data: FloorPlanRequest,
    pub result: GenerationResult,
}

impl ProvenanceRecord {
    pub fn new<Tz>(at: &DateTime<Tz>, request_data: FloorPlanRequest, result: GenerationResult) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            request_data,
            result,
        }
    }
}
