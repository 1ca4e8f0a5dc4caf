use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every 4xx/5xx response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
