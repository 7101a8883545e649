//! Checks on a prospective assignment before it reaches the schedule.
//!
//! Every missing field is reported, not just the first. A course or room
//! counts as missing when it is absent; a day or time slot when it is empty.
//! Catalog ids are compared by presence, so id `0` is a valid id.

use crate::data::{Course, CourseId, Room, RoomId, ValidationReport};

pub fn validate_assignment(
    course: Option<&Course>,
    room: Option<&Room>,
    day: &str,
    time_slot: &str,
) -> ValidationReport {
    let mut errors = Vec::new();

    if course.is_none() {
        errors.push("Course is required".to_string());
    }
    if room.is_none() {
        errors.push("Room is required".to_string());
    }
    push_calendar_errors(day, time_slot, &mut errors);

    ValidationReport::from_errors(errors)
}

/// Resolves ids against the catalog, then validates.
///
/// An id with no catalog entry is reported as unknown in place of the
/// generic "required" message.
pub fn validate_catalog_assignment(
    courses: &[Course],
    rooms: &[Room],
    course_id: CourseId,
    room_id: RoomId,
    day: &str,
    time_slot: &str,
) -> ValidationReport {
    let course = courses.iter().find(|c| c.id == course_id);
    let room = rooms.iter().find(|r| r.id == room_id);
    validate_resolved(course, course_id, room, room_id, day, time_slot)
}

/// Validates catalog lookups that were already made by the caller.
pub fn validate_resolved(
    course: Option<&Course>,
    course_id: CourseId,
    room: Option<&Room>,
    room_id: RoomId,
    day: &str,
    time_slot: &str,
) -> ValidationReport {
    let mut errors = Vec::new();
    if course.is_none() {
        errors.push(format!("Unknown course id {course_id}"));
    }
    if room.is_none() {
        errors.push(format!("Unknown room id {room_id}"));
    }
    push_calendar_errors(day, time_slot, &mut errors);

    ValidationReport::from_errors(errors)
}

fn push_calendar_errors(day: &str, time_slot: &str, errors: &mut Vec<String>) {
    if day.is_empty() {
        errors.push("Day is required".to_string());
    }
    if time_slot.is_empty() {
        errors.push("Time slot is required".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimetableConfig;

    #[test]
    fn missing_course_is_reported() {
        let config = TimetableConfig::default();
        let report = validate_assignment(None, Some(&config.rooms[0]), "Monday", "08:00-10:00");
        assert!(!report.is_valid);
        assert!(report.errors.contains(&"Course is required".to_string()));
    }

    #[test]
    fn complete_assignment_is_valid() {
        let config = TimetableConfig::default();
        let report = validate_assignment(
            Some(&config.courses[0]),
            Some(&config.rooms[0]),
            "Monday",
            "08:00-10:00",
        );
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn collects_every_missing_field_in_order() {
        let report = validate_assignment(None, None, "", "");
        assert_eq!(
            report.errors,
            vec![
                "Course is required",
                "Room is required",
                "Day is required",
                "Time slot is required"
            ]
        );
    }

    #[test]
    fn zero_id_counts_as_present() {
        let mut config = TimetableConfig::default();
        config.courses[0].id = 0;
        let report = validate_catalog_assignment(
            &config.courses,
            &config.rooms,
            0,
            1,
            "Monday",
            "08:00-10:00",
        );
        assert!(report.is_valid);
    }

    #[test]
    fn unknown_ids_are_named() {
        let config = TimetableConfig::default();
        let report = validate_catalog_assignment(
            &config.courses,
            &config.rooms,
            99,
            42,
            "Monday",
            "08:00-10:00",
        );
        assert_eq!(report.errors, vec!["Unknown course id 99", "Unknown room id 42"]);
    }
}
