//! Configuration loading and management for the shift schedule engine.
//!
//! This module provides functionality to load the engine configuration from
//! YAML files: unit pay bands, differential rules, the holiday calendar, and
//! shift timing.
//!
//! # Example
//!
//! ```no_run
//! use shift_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded configuration: {}", loader.config().metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DatedHoliday, DifferentialKind, DifferentialRule, DifferentialsFile, EngineConfig, EngineFile,
    EngineMetadata, FixedHoliday, HolidayCalendar, ScheduleSettings, ShiftTimes, UnitBand,
    UnitsFile,
};
