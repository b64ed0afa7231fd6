use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Outcome of one generation attempt.
///
/// Serialized as the flat envelope the frontend consumes:
/// `{"success": true, "image_url": ..., "message": ...}` or
/// `{"success": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GenerationEnvelope", try_from = "GenerationEnvelope")]
pub enum GenerationResult {
    Success { image_url: String, message: String },
    Failure { error: String },
}

impl GenerationResult {
    pub fn success(image_url: impl Into<String>, message: impl Into<String>) -> Self {
        GenerationResult::Success {
            image_url: image_url.into(),
            message: message.into(),
        }
    }

    pub fn failure(cause: impl Display) -> Self {
        GenerationResult::Failure {
            error: format!("AI generation failed: {}", cause),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            GenerationResult::Success { .. } => "success",
            GenerationResult::Failure { .. } => "failure",
        }
    }
}

/// Wire form of [`GenerationResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<GenerationResult> for GenerationEnvelope {
    fn from(result: GenerationResult) -> Self {
        match result {
            GenerationResult::Success { image_url, message } => GenerationEnvelope {
                success: true,
                image_url: Some(image_url),
                message: Some(message),
                error: None,
            },
            GenerationResult::Failure { error } => GenerationEnvelope {
                success: false,
                image_url: None,
                message: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<GenerationEnvelope> for GenerationResult {
    type Error = String;

    fn try_from(envelope: GenerationEnvelope) -> Result<Self, Self::Error> {
        if envelope.success {
            let image_url = envelope
                .image_url
                .ok_or_else(|| "successful result is missing image_url".to_string())?;
            Ok(GenerationResult::Success {
                image_url,
                message: envelope.message.unwrap_or_default(),
            })
        } else {
            let error = envelope
                .error
                .ok_or_else(|| "failed result is missing error".to_string())?;
            Ok(GenerationResult::Failure { error })
        }
    }
}
