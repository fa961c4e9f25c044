//! HTTP request handlers for the Shift Schedule Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{price_shift, PriceRequest};
use crate::error::EngineError;
use crate::models::SchedulingCriteria;
use crate::scheduling::simulate;
use crate::validation::violations;

use super::request::{ConstraintCheckRequest, ScheduleRequest};
use super::response::{ApiError, ApiErrorResponse, ConstraintCheckResponse, ScheduleResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/schedule", post(schedule_handler))
        .route("/price", post(price_handler))
        .route("/constraints/check", post(constraint_check_handler))
        .route("/units", get(units_handler))
        .with_state(state)
}

/// Handler for POST /schedule.
///
/// Generates and prices a schedule from the submitted criteria.
async fn schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing schedule request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let criteria = match SchedulingCriteria::try_from(request) {
        Ok(criteria) => criteria,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    match simulate(&criteria, state.config().config()) {
        Ok(schedule) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                pattern = %criteria.shift_pattern,
                unit = %criteria.unit_type,
                shifts_count = schedule.events.len(),
                total_earnings = %schedule.total_earnings,
                duration_us,
                "Schedule generated successfully"
            );
            json_response(
                StatusCode::OK,
                ScheduleResponse {
                    schedule_id: Uuid::new_v4(),
                    generated_at: Utc::now(),
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    duration_us,
                    schedule,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /price.
///
/// Prices a single shift without generating a schedule.
async fn price_handler(
    State(state): State<AppState>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing price request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match price_shift(&request, state.config().config()) {
        Ok(pricing) => {
            info!(
                correlation_id = %correlation_id,
                date = %request.date,
                hourly_rate = %pricing.hourly_rate,
                "Shift priced"
            );
            json_response(StatusCode::OK, pricing)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /constraints/check.
///
/// A shift that breaks a rule is still a successful check; the violations
/// are reported in the body.
async fn constraint_check_handler(
    payload: Result<Json<ConstraintCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing constraint check");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let found = violations(&request.shift, &request.existing_shifts, &request.rules);
    info!(
        correlation_id = %correlation_id,
        existing = request.existing_shifts.len(),
        violations = found.len(),
        "Constraint check completed"
    );
    json_response(
        StatusCode::OK,
        ConstraintCheckResponse {
            valid: found.is_empty(),
            violations: found,
        },
    )
}

/// Handler for GET /units.
async fn units_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config().config().units().clone())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message is only in the body text
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}
