//! Response types for the Shift Schedule Engine API.
//!
//! This module defines the success envelopes, the error response
//! structures, and the mapping from engine errors to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::ScheduleResult;
use crate::validation::ConstraintViolation;

/// Response body for the `/schedule` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// Unique identifier for this generation run.
    pub schedule_id: Uuid,
    /// When the schedule was generated.
    pub generated_at: DateTime<Utc>,
    /// The engine version that produced the schedule.
    pub engine_version: String,
    /// Generation time in microseconds.
    pub duration_us: u64,
    /// The generated schedule.
    pub schedule: ScheduleResult,
}

/// Response body for the `/constraints/check` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintCheckResponse {
    /// True when there are no violations.
    pub valid: bool,
    /// Every violation found, rest checks first.
    pub violations: Vec<ConstraintViolation>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a unit not found error response.
    pub fn unit_not_found(unit: &str) -> Self {
        Self::with_details(
            "UNIT_NOT_FOUND",
            format!("Unit type not found: {}", unit),
            format!("The unit type '{}' has no configured pay band", unit),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfiguration { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_CONFIGURATION",
                    format!("Invalid value for '{}': {}", field, message),
                    "The request names an option this engine does not support",
                ),
            },
            EngineError::UnitNotFound { unit } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::unit_not_found(&unit),
            },
            EngineError::InvalidCriteria { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_CRITERIA",
                    format!("Invalid criteria field '{}': {}", field, message),
                    "The scheduling criteria are out of range",
                ),
            },
        }
    }
}
