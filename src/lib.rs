//! Shift Schedule Engine for nurse scheduling
//!
//! This crate generates multi-week shift calendars from scheduling criteria
//! (shift pattern, day/night rotation, unit, experience, caps and requested
//! days off) and prices every shift by stacking per-hour differentials on a
//! unit's experience-scaled base pay. It also checks ad-hoc shift placements
//! against rest and run-length constraints, and serves all of this over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduling;
pub mod validation;
