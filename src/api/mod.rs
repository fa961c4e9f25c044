//! HTTP API module for the Shift Schedule Engine.
//!
//! This module provides the REST API endpoints for generating schedules,
//! pricing single shifts, checking shift placements and listing units.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ConstraintCheckRequest, ScheduleRequest};
pub use response::{ApiError, ConstraintCheckResponse, ScheduleResponse};
pub use state::AppState;
