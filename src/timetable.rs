//! An editing session over one timetable.
//!
//! Owns the configuration and the currently published schedule. Every change
//! publishes a new schedule and recomputes conflicts over the whole of it.

use log::{error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::TimetableConfig;
use crate::conflicts::detect_conflicts;
use crate::data::{
    Assignment, Conflict, CourseId, LecturerWorkload, RoomId, RoomUsage, SchedulingOutput,
    SlotKey, Statistics, ValidationReport,
};
use crate::error::EngineError;
use crate::export;
use crate::schedule::Schedule;
use crate::solver;
use crate::stats;
use crate::validation::{validate_catalog_assignment, validate_resolved};

pub struct Timetable {
    config: TimetableConfig,
    schedule: Schedule,
    conflicts: Vec<Conflict>,
    rng: StdRng,
}

impl Timetable {
    pub fn new(config: TimetableConfig) -> Self {
        let rng = match config.solver.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Timetable {
            config,
            schedule: Schedule::new(),
            conflicts: Vec::new(),
            rng,
        }
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Places a catalog course in a catalog room at (`day`, `time_slot`).
    ///
    /// A failed validation leaves the schedule untouched. An occupied slot is
    /// overwritten.
    pub fn assign_course(
        &mut self,
        day: &str,
        time_slot: &str,
        course_id: CourseId,
        room_id: RoomId,
    ) -> Result<&Schedule, EngineError> {
        let course = self.config.courses.iter().find(|c| c.id == course_id);
        let room = self.config.rooms.iter().find(|r| r.id == room_id);
        let report = validate_resolved(course, course_id, room, room_id, day, time_slot);

        let (course, room) = match (course, room) {
            (Some(course), Some(room)) if report.is_valid => (course, room),
            _ => {
                error!("Assignment validation failed: {:?}", report.errors);
                return Err(EngineError::Validation(report.errors));
            }
        };

        let slot = SlotKey::encode(day, time_slot);
        if !self.schedule.is_free(&slot) {
            warn!("Slot {} is not available; overwriting", slot);
        }

        let assignment = Assignment::build(course, room);
        info!("Assigning {} to {} in {}", assignment.code, slot, assignment.room);
        let next = self.schedule.put(slot, assignment);
        self.publish(next);
        Ok(&self.schedule)
    }

    pub fn remove_assignment(&mut self, day: &str, time_slot: &str) -> &Schedule {
        let slot = SlotKey::encode(day, time_slot);
        let next = self.schedule.remove(&slot);
        self.publish(next);
        &self.schedule
    }

    /// Replaces the whole schedule with a freshly generated one.
    pub fn auto_generate(&mut self) -> SchedulingOutput {
        let output = solver::solve(
            &self.config.scheduling_input(),
            self.config.solver.restarts,
            &mut self.rng,
        );
        self.publish(output.schedule.clone());
        output
    }

    pub fn clear(&mut self) {
        self.publish(Schedule::new());
    }

    pub fn validate_assignment(
        &self,
        course_id: CourseId,
        room_id: RoomId,
        day: &str,
        time_slot: &str,
    ) -> ValidationReport {
        validate_catalog_assignment(
            &self.config.courses,
            &self.config.rooms,
            course_id,
            room_id,
            day,
            time_slot,
        )
    }

    /// False for unknown ids, otherwise whether the slot is free.
    pub fn check_slot_availability(
        &self,
        day: &str,
        time_slot: &str,
        course_id: CourseId,
        room_id: RoomId,
    ) -> bool {
        let course = self.config.courses.iter().find(|c| c.id == course_id);
        let room = self.config.rooms.iter().find(|r| r.id == room_id);
        match (course, room) {
            (Some(course), Some(room)) => self.schedule.is_available(
                &SlotKey::encode(day, time_slot),
                &course.lecturer,
                &room.name,
            ),
            _ => false,
        }
    }

    pub fn available_slots(&self, lecturer: &str) -> Vec<SlotKey> {
        self.schedule
            .find_available_slots(lecturer, &self.config.days, &self.config.time_slots)
    }

    pub fn statistics(&self) -> Statistics {
        stats::aggregate_statistics(&self.schedule, &self.config.courses, &self.config.rooms)
    }

    pub fn room_utilization(&self) -> Vec<RoomUsage> {
        stats::room_utilization(&self.schedule, &self.config.courses, &self.config.rooms)
    }

    pub fn lecturer_workload(&self) -> Vec<LecturerWorkload> {
        stats::lecturer_workload(&self.schedule, &self.config.courses)
    }

    pub fn completion(&self) -> u32 {
        stats::completion(&self.schedule, &self.config.courses)
    }

    pub fn export_csv(&self) -> String {
        export::schedule_to_csv(&self.schedule, &self.config.days, &self.config.time_slots)
    }

    fn publish(&mut self, schedule: Schedule) {
        self.conflicts = detect_conflicts(&schedule);
        self.schedule = schedule;
    }
}
