//! Timetable configuration.
//!
//! The catalog (courses, rooms) and the shape of the week (days, time slots)
//! are static for the life of a session. They are loaded once from TOML, or
//! taken from [`TimetableConfig::default`], and handed to the engine.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{Course, Room, SchedulingInput};
use crate::error::ConfigError;

pub const DEFAULT_RESTARTS: usize = 50;
pub const MAX_RESTARTS: usize = 10_000;
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimetableConfig {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    pub days: Vec<String>,
    pub time_slots: Vec<String>,
    #[serde(default)]
    pub solver: SolverSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolverSettings {
    /// Independent random candidates built per auto-generate run.
    #[serde(default = "default_restarts")]
    pub restarts: usize,
    /// Fixed seed for reproducible runs. Fresh OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            restarts: DEFAULT_RESTARTS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind: default_bind(),
        }
    }
}

fn default_restarts() -> usize {
    DEFAULT_RESTARTS
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl TimetableConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: TimetableConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days.is_empty() {
            return Err(ConfigError::Invalid("at least one day is required".into()));
        }
        if self.time_slots.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one time slot is required".into(),
            ));
        }
        if self.solver.restarts == 0 || self.solver.restarts > MAX_RESTARTS {
            return Err(ConfigError::Invalid(format!(
                "solver.restarts must be between 1 and {MAX_RESTARTS}"
            )));
        }

        let mut course_ids = HashSet::new();
        for course in &self.courses {
            if !course_ids.insert(course.id) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate course id {}",
                    course.id
                )));
            }
        }
        let mut room_ids = HashSet::new();
        for room in &self.rooms {
            if !room_ids.insert(room.id) {
                return Err(ConfigError::Invalid(format!("duplicate room id {}", room.id)));
            }
        }
        Ok(())
    }

    pub fn scheduling_input(&self) -> SchedulingInput {
        SchedulingInput {
            courses: self.courses.clone(),
            rooms: self.rooms.clone(),
            days: self.days.clone(),
            time_slots: self.time_slots.clone(),
        }
    }
}

impl Default for TimetableConfig {
    fn default() -> Self {
        let course = |id, name: &str, code: &str, credits, lecturer: &str, duration| Course {
            id,
            code: code.to_string(),
            name: name.to_string(),
            lecturer: lecturer.to_string(),
            credits,
            duration,
        };
        let room = |id, name: &str, capacity, room_type: &str| Room {
            id,
            name: name.to_string(),
            capacity,
            room_type: room_type.to_string(),
        };

        TimetableConfig {
            courses: vec![
                course(1, "Computer Science 101", "CS101", 3, "Dr. Smith", 2.0),
                course(2, "Mathematics", "MATH201", 4, "Prof. Johnson", 2.0),
                course(3, "Physics", "PHY101", 3, "Dr. Brown", 1.5),
                course(4, "Chemistry", "CHEM101", 3, "Dr. Davis", 2.0),
            ],
            rooms: vec![
                room(1, "Room A101", 50, "Lecture Hall"),
                room(2, "Lab B201", 30, "Laboratory"),
                room(3, "Room C301", 40, "Classroom"),
                room(4, "Auditorium", 200, "Auditorium"),
            ],
            days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .map(String::from)
                .to_vec(),
            time_slots: [
                "08:00-10:00",
                "10:00-12:00",
                "12:00-14:00",
                "14:00-16:00",
                "16:00-18:00",
            ]
            .map(String::from)
            .to_vec(),
            solver: SolverSettings::default(),
            server: ServerSettings::default(),
        }
    }
}
