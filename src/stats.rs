//! Schedule statistics.
//!
//! Read-side projections used by the statistics panel. None of these feed
//! back into scheduling.

use std::collections::HashSet;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::data::{Course, LecturerWorkload, Room, RoomUsage, Statistics};
use crate::schedule::Schedule;

/// Summarises a schedule against the catalog.
///
/// `utilization_rate` is the share of catalog courses placed at least once,
/// not the share of grid cells filled. It is zero for an empty schedule or an
/// empty catalog.
pub fn aggregate_statistics(schedule: &Schedule, courses: &[Course], rooms: &[Room]) -> Statistics {
    let total_slots = schedule.len();
    let mut assigned_courses = HashSet::new();
    let mut used_rooms = HashSet::new();
    let mut lecturer_load: IndexMap<String, usize> = IndexMap::new();

    for assignment in schedule.assignments() {
        assigned_courses.insert(assignment.code.as_str());
        used_rooms.insert(assignment.room.as_str());
        *lecturer_load.entry(assignment.lecturer.clone()).or_default() += 1;
    }

    let utilization_rate = if total_slots > 0 && !courses.is_empty() {
        assigned_courses.len() as f64 / courses.len() as f64 * 100.0
    } else {
        0.0
    };

    Statistics {
        total_assignments: total_slots,
        assigned_courses: assigned_courses.len(),
        total_courses: courses.len(),
        used_rooms: used_rooms.len(),
        total_rooms: rooms.len(),
        lecturer_load,
        utilization_rate,
    }
}

/// Classes per catalog room, as a rounded percentage of the course count.
pub fn room_utilization(schedule: &Schedule, courses: &[Course], rooms: &[Room]) -> Vec<RoomUsage> {
    rooms
        .iter()
        .map(|room| {
            let classes = schedule.assignments().filter(|a| a.room == room.name).count();
            RoomUsage {
                room: room.name.clone(),
                classes,
                utilization: percent(classes, courses.len()),
            }
        })
        .collect()
}

/// Classes per distinct catalog lecturer, in catalog order.
pub fn lecturer_workload(schedule: &Schedule, courses: &[Course]) -> Vec<LecturerWorkload> {
    courses
        .iter()
        .map(|c| c.lecturer.as_str())
        .unique()
        .map(|lecturer| LecturerWorkload {
            lecturer: lecturer.to_string(),
            classes: schedule.assignments().filter(|a| a.lecturer == lecturer).count(),
        })
        .collect()
}

/// Filled cells as a rounded percentage of the course count.
pub fn completion(schedule: &Schedule, courses: &[Course]) -> u32 {
    percent(schedule.len(), courses.len())
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
