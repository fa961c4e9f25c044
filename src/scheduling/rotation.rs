//! Day/night rotation state machine.
//!
//! A rotating schedule flips between day and night after a run of
//! consecutive worked shifts. The run counter here is only for rotation
//! cadence; the consecutive-shift cap keeps its own counter in the
//! simulator.

use crate::models::{RotationPattern, ShiftType};

/// Rotation state for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationState {
    current: ShiftType,
    run_length: u32,
    pattern: RotationPattern,
    flip_after: u32,
}

impl RotationState {
    /// Starts on nights when `prefer_night` is set, otherwise on days.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_engine::models::{RotationPattern, ShiftType};
    /// use shift_engine::scheduling::RotationState;
    ///
    /// let mut state = RotationState::new(RotationPattern::Rotating, false, 3);
    /// state.record_worked();
    /// state.record_worked();
    /// assert!(state.record_worked());
    /// assert_eq!(state.current(), ShiftType::Night);
    /// ```
    pub fn new(pattern: RotationPattern, prefer_night: bool, flip_after: u32) -> Self {
        let current = if prefer_night {
            ShiftType::Night
        } else {
            ShiftType::Day
        };
        Self {
            current,
            run_length: 0,
            pattern,
            flip_after: flip_after.max(1),
        }
    }

    /// The shift type the next worked shift gets.
    pub fn current(&self) -> ShiftType {
        self.current
    }

    /// Worked shifts since the last flip or break.
    pub fn run_length(&self) -> u32 {
        self.run_length
    }

    /// Records a worked shift. Returns true if the state flipped.
    pub fn record_worked(&mut self) -> bool {
        self.run_length += 1;
        if self.pattern != RotationPattern::Fixed && self.run_length >= self.flip_after {
            self.current = self.current.flipped();
            self.run_length = 0;
            return true;
        }
        false
    }

    /// Records a day not worked, which breaks the run.
    pub fn record_skipped(&mut self) {
        self.run_length = 0;
    }
}
