//! Weekly class timetable engine.
//!
//! Courses are placed into (day, time slot) cells with a room. The engine
//! keeps the schedule as an immutable value, reports lecturer and room
//! double-bookings, validates manual assignments, generates candidate
//! schedules by random restarts, and summarises the result.

pub mod config;
pub mod conflicts;
pub mod data;
pub mod error;
pub mod export;
pub mod schedule;
pub mod server;
pub mod solver;
pub mod stats;
pub mod timetable;
pub mod validation;

pub use config::TimetableConfig;
pub use data::{Assignment, Conflict, Course, Room, SlotKey, Statistics, ValidationReport};
pub use error::{ConfigError, EngineError};
pub use schedule::Schedule;
pub use timetable::Timetable;
