//! Plain-text snapshots of a schedule laid over the weekly grid.

use chrono::{SecondsFormat, Utc};

use crate::data::SlotKey;
use crate::schedule::Schedule;

const CSV_HEADERS: [&str; 7] = [
    "Day",
    "Time Slot",
    "Course Code",
    "Course Name",
    "Lecturer",
    "Room",
    "Credits",
];

/// One quoted row per cell, day-major. Free cells keep their day and time
/// slot with the remaining fields blank.
pub fn schedule_to_csv(schedule: &Schedule, days: &[String], time_slots: &[String]) -> String {
    let mut rows: Vec<Vec<String>> = vec![CSV_HEADERS.iter().map(|h| h.to_string()).collect()];

    for day in days {
        for time_slot in time_slots {
            let mut row = vec![day.clone(), time_slot.clone()];
            match schedule.get(&SlotKey::encode(day, time_slot)) {
                Some(a) => row.extend([
                    a.code.clone(),
                    a.course.clone(),
                    a.lecturer.clone(),
                    a.room.clone(),
                    a.credits.to_string(),
                ]),
                None => row.extend(std::iter::repeat_n(String::new(), 5)),
            }
            rows.push(row);
        }
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn schedule_to_json(schedule: &Schedule) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(schedule)
}

/// `<base>-<UTC timestamp>.<ext>` with `:` and `.` in the timestamp made file-safe.
pub fn timestamped_filename(base: &str, extension: &str) -> String {
    let timestamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{base}-{timestamp}.{extension}")
}
