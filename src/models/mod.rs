//! Core data models for the shift schedule engine.
//!
//! This module contains all the domain models used throughout the engine.

mod criteria;
mod schedule;
mod shift_event;

pub use criteria::{RotationPattern, SchedulingCriteria, ShiftPattern, ShiftType};
pub use schedule::{DayDecision, DayOutcome, ScheduleResult, ScheduleSummary};
pub use shift_event::{AppliedDifferential, ShiftEvent, ShiftWindow};
