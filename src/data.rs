use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schedule::Schedule;

// Type aliases for clarity
pub type RoomId = u32;
pub type CourseId = u32;
pub type Lecturer = String;

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub name: String,
    pub lecturer: Lecturer,
    pub credits: u32,
    /// Hours per session. Informational only, never checked against slot length.
    pub duration: f64,
}

/// A physical room in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub room_type: String,
}

/// Identifies one (day, time slot) cell of the weekly grid.
///
/// Treated as an opaque composite key: nothing splits it back into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SlotKey(String);

impl SlotKey {
    pub fn encode(day: &str, time_slot: &str) -> Self {
        SlotKey(format!("{day}-{time_slot}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A course placed in a room, snapshotted at assignment time.
///
/// Holds display fields only. There is no link back to the catalog entries,
/// so later catalog edits never reach existing assignments.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Assignment {
    pub course: String,
    pub code: String,
    pub lecturer: Lecturer,
    pub room: String,
    pub credits: u32,
    pub duration: f64,
}

impl Assignment {
    pub fn build(course: &Course, room: &Room) -> Self {
        Assignment {
            course: course.name.clone(),
            code: course.code.clone(),
            lecturer: course.lecturer.clone(),
            room: room.name.clone(),
            credits: course.credits,
            duration: course.duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Lecturer,
    Room,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
}

/// A lecturer or room double-booking reported for display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub message: String,
    pub slot: SlotKey,
    pub severity: Severity,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.slot, self.message)
    }
}

/// Outcome of checking a prospective assignment's required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Read-side summary of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_assignments: usize,
    pub assigned_courses: usize,
    pub total_courses: usize,
    pub used_rooms: usize,
    pub total_rooms: usize,
    pub lecturer_load: IndexMap<Lecturer, usize>,
    /// Percentage of catalog courses scheduled at least once.
    pub utilization_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUsage {
    pub room: String,
    pub classes: usize,
    pub utilization: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LecturerWorkload {
    pub lecturer: Lecturer,
    pub classes: usize,
}

/// Everything the auto-scheduler needs: catalog plus the shape of the week.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingInput {
    pub courses: Vec<Course>,
    pub rooms: Vec<Room>,
    pub days: Vec<String>,
    pub time_slots: Vec<String>,
}

/// The final output of the auto-scheduler.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingOutput {
    pub schedule: Schedule,
    /// Negated spread between the busiest and quietest day.
    pub fitness: i64,
    /// Codes of courses that found no free cell.
    pub unscheduled: Vec<String>,
}
