//! Schedule store.
//!
//! A schedule maps occupied slot keys to their assignment; a free slot has no
//! key at all. Mutations never touch the receiver: `put` and `remove` hand back
//! a new schedule and the caller decides whether to publish it. Entries keep
//! insertion order so conflicts and exports come out in a stable order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::{Assignment, SlotKey};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    entries: IndexMap<SlotKey, Assignment>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `slot` set to `assignment`.
    ///
    /// An occupied slot is overwritten in place, keeping its position.
    pub fn put(&self, slot: SlotKey, assignment: Assignment) -> Schedule {
        let mut entries = self.entries.clone();
        entries.insert(slot, assignment);
        Schedule { entries }
    }

    /// Returns a copy without `slot`. Removing a free slot yields an equal schedule.
    pub fn remove(&self, slot: &SlotKey) -> Schedule {
        let mut entries = self.entries.clone();
        entries.shift_remove(slot);
        Schedule { entries }
    }

    pub fn is_free(&self, slot: &SlotKey) -> bool {
        !self.entries.contains_key(slot)
    }

    /// Availability check with lecturer and room matching.
    ///
    /// The lecturer and room checks only look at `slot` itself, which an
    /// occupied slot has already ruled out, so the result always equals
    /// [`Schedule::is_free`].
    pub fn is_available(&self, slot: &SlotKey, lecturer: &str, room: &str) -> bool {
        if !self.is_free(slot) {
            return false;
        }

        let lecturer_conflict = self
            .entries
            .iter()
            .any(|(key, a)| key == slot && a.lecturer == lecturer);
        let room_conflict = self
            .entries
            .iter()
            .any(|(key, a)| key == slot && a.room == room);

        !lecturer_conflict && !room_conflict
    }

    /// Free slots not already held by `lecturer`, day-major.
    pub fn find_available_slots(
        &self,
        lecturer: &str,
        days: &[String],
        time_slots: &[String],
    ) -> Vec<SlotKey> {
        let lecturer_slots: Vec<&SlotKey> = self
            .entries
            .iter()
            .filter(|(_, a)| a.lecturer == lecturer)
            .map(|(key, _)| key)
            .collect();

        days.iter()
            .flat_map(|day| time_slots.iter().map(move |ts| SlotKey::encode(day, ts)))
            .filter(|key| !lecturer_slots.contains(&key) && self.is_free(key))
            .collect()
    }

    pub fn get(&self, slot: &SlotKey) -> Option<&Assignment> {
        self.entries.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &Assignment)> {
        self.entries.iter()
    }

    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(SlotKey, Assignment)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (SlotKey, Assignment)>>(iter: I) -> Self {
        Schedule {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimetableConfig;

    fn sample_assignment(course: usize, room: usize) -> Assignment {
        let config = TimetableConfig::default();
        Assignment::build(&config.courses[course], &config.rooms[room])
    }

    fn sample_schedule() -> Schedule {
        Schedule::new()
            .put(SlotKey::encode("Monday", "08:00-10:00"), sample_assignment(0, 0))
            .put(SlotKey::encode("Tuesday", "10:00-12:00"), sample_assignment(1, 1))
    }

    #[test]
    fn put_then_remove_restores_schedule() {
        let s = sample_schedule();
        let key = SlotKey::encode("Friday", "16:00-18:00");
        let added = s.put(key.clone(), sample_assignment(2, 2));

        assert_eq!(added.len(), 3);
        assert_eq!(added.remove(&key), s);
    }

    #[test]
    fn remove_absent_slot_is_noop() {
        let s = sample_schedule();
        assert_eq!(s.remove(&SlotKey::encode("Sunday", "AM")), s);
    }

    #[test]
    fn put_leaves_receiver_unchanged() {
        let s = sample_schedule();
        let key = SlotKey::encode("Wednesday", "12:00-14:00");
        let _ = s.put(key.clone(), sample_assignment(3, 3));
        assert!(s.is_free(&key));
    }

    #[test]
    fn occupancy_follows_put_and_remove() {
        let key = SlotKey::encode("Thursday", "14:00-16:00");
        let s = Schedule::new().put(key.clone(), sample_assignment(0, 1));
        assert!(!s.is_free(&key));
        assert!(s.remove(&key).is_free(&key));
    }

    #[test]
    fn put_overwrites_in_place() {
        let s = sample_schedule();
        let key = SlotKey::encode("Monday", "08:00-10:00");
        let replaced = s.put(key.clone(), sample_assignment(3, 3));

        assert_eq!(replaced.len(), 2);
        assert_eq!(replaced.get(&key).unwrap().code, "CHEM101");
        assert_eq!(replaced.iter().next().unwrap().0, &key);
    }

    #[test]
    fn availability_reduces_to_occupancy() {
        let s = sample_schedule();
        let taken = SlotKey::encode("Monday", "08:00-10:00");
        let open = SlotKey::encode("Monday", "10:00-12:00");

        assert!(!s.is_available(&taken, "Dr. Brown", "Room C301"));
        // Same lecturer and room as the Monday 08:00 class, different cell.
        assert!(s.is_available(&open, "Dr. Smith", "Room A101"));
    }

    #[test]
    fn find_available_slots_skips_occupied_cells() {
        let config = TimetableConfig::default();
        let s = sample_schedule();
        let slots = s.find_available_slots("Dr. Smith", &config.days, &config.time_slots);

        assert_eq!(slots.len(), 23);
        assert_eq!(slots[0], SlotKey::encode("Monday", "10:00-12:00"));
        assert!(!slots.contains(&SlotKey::encode("Tuesday", "10:00-12:00")));
    }

    #[test]
    fn serializes_as_plain_mapping() {
        let s = sample_schedule();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["Monday-08:00-10:00"]["code"], "CS101");
        assert_eq!(json["Tuesday-10:00-12:00"]["room"], "Lab B201");
    }
}
