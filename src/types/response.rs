//! Shared response types.

use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome description
    #[schema(example = "Update user: jdoe successfully.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
