use crate::data::{Assignment, Course, Room, SchedulingInput, SchedulingOutput, SlotKey};
use crate::schedule::Schedule;
use itertools::{Itertools, MinMaxResult};
use log::{info, trace, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// One randomly built schedule and what it left behind.
struct Candidate<'a> {
    schedule: Schedule,
    placed_days: Vec<&'a str>,
    unscheduled: Vec<String>,
}

/// Builds `restarts` independent random candidates and keeps the one whose
/// classes are spread most evenly across days.
///
/// Each candidate shuffles the (day, time slot) cells and gives every course,
/// in catalog order, the first cell not yet taken. Rooms go round-robin by the
/// course's catalog position, with no check against other classes in that room.
/// Courses beyond the number of cells stay unscheduled. Fitness ignores
/// lecturers, rooms, capacity and duration entirely.
pub fn solve<R: Rng + ?Sized>(
    input: &SchedulingInput,
    restarts: usize,
    rng: &mut R,
) -> SchedulingOutput {
    let start_time = Instant::now();
    let mut cells: Vec<(&str, &str)> = input
        .days
        .iter()
        .cartesian_product(input.time_slots.iter())
        .map(|(day, ts)| (day.as_str(), ts.as_str()))
        .collect();

    info!(
        "Setting up auto-scheduler with {} courses, {} rooms, and {} cells over {} restarts...",
        input.courses.len(),
        input.rooms.len(),
        cells.len(),
        restarts
    );
    if input.rooms.is_empty() && !input.courses.is_empty() {
        warn!("No rooms configured; every course will be left unscheduled.");
    }

    let mut best = build_candidate(&input.courses, &input.rooms, &mut cells, &mut *rng);
    let mut best_score = fitness(&input.days, &best.placed_days);
    trace!("Restart 0: {} assignments, fitness {}", best.schedule.len(), best_score);

    for restart in 1..restarts {
        let candidate = build_candidate(&input.courses, &input.rooms, &mut cells, &mut *rng);
        let score = fitness(&input.days, &candidate.placed_days);
        trace!(
            "Restart {}: {} assignments, fitness {}",
            restart,
            candidate.schedule.len(),
            score
        );

        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }

    info!(
        "Auto-schedule found in {:.2?}: {} assignments, fitness {}",
        start_time.elapsed(),
        best.schedule.len(),
        best_score
    );

    SchedulingOutput {
        schedule: best.schedule,
        fitness: best_score,
        unscheduled: best.unscheduled,
    }
}

/// Convenience wrapper returning only the chosen schedule.
pub fn generate_auto_schedule<R: Rng + ?Sized>(
    courses: &[Course],
    rooms: &[Room],
    days: &[String],
    time_slots: &[String],
    restarts: usize,
    rng: &mut R,
) -> Schedule {
    let input = SchedulingInput {
        courses: courses.to_vec(),
        rooms: rooms.to_vec(),
        days: days.to_vec(),
        time_slots: time_slots.to_vec(),
    };
    solve(&input, restarts, rng).schedule
}

fn build_candidate<'a, R: Rng + ?Sized>(
    courses: &[Course],
    rooms: &[Room],
    cells: &mut [(&'a str, &'a str)],
    rng: &mut R,
) -> Candidate<'a> {
    cells.shuffle(rng);

    let mut schedule = Schedule::new();
    let mut used: HashSet<SlotKey> = HashSet::new();
    let mut placed_days = Vec::new();
    let mut unscheduled = Vec::new();

    for (index, course) in courses.iter().enumerate() {
        let free_cell = cells
            .iter()
            .map(|&(day, ts)| (day, SlotKey::encode(day, ts)))
            .find(|(_, key)| !used.contains(key));

        match (free_cell, rooms.get(index % rooms.len().max(1))) {
            (Some((day, key)), Some(room)) => {
                used.insert(key.clone());
                schedule = schedule.put(key, Assignment::build(course, room));
                placed_days.push(day);
            }
            _ => unscheduled.push(course.code.clone()),
        }
    }

    Candidate {
        schedule,
        placed_days,
        unscheduled,
    }
}

/// Negated difference between the busiest and quietest day of the calendar.
///
/// Every calendar day counts, so a day with no classes contributes zero.
fn fitness(days: &[String], placed_days: &[&str]) -> i64 {
    let mut counts: HashMap<&str, usize> = days.iter().map(|day| (day.as_str(), 0)).collect();
    for &day in placed_days {
        *counts.entry(day).or_default() += 1;
    }
    match counts.values().minmax() {
        MinMaxResult::MinMax(min, max) => -((max - min) as i64),
        MinMaxResult::OneElement(_) | MinMaxResult::NoElements => 0,
    }
}
