//! Schedule generation.
//!
//! A [`ShiftPattern`](crate::models::ShiftPattern) resolves to a
//! [`PatternPolicy`]; the [`RotationState`] machine assigns day or night to
//! each worked shift; [`simulate`] walks the calendar and prices each shift
//! through [`crate::calculation`].

mod pattern;
mod rotation;
mod simulator;

pub use pattern::{PatternPolicy, WorkRule};
pub use rotation::RotationState;
pub use simulator::simulate;
