use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields every floor plan request must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 3] = ["sqft", "depth", "width"];

/// A validated floor plan request.
///
/// Holds the submitted JSON object exactly as received, including any
/// fields beyond [`REQUIRED_FIELDS`] and their original order. Built through
/// [`crate::services::validator::validate`] so the required fields are
/// always present and non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorPlanRequest(Map<String, Value>);

impl FloorPlanRequest {
    pub(crate) fn from_validated(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}
