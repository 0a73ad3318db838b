use crate::models::{Instructor, Slot};
use std::collections::HashMap;

/// Remaining seats per (instructor, slot), keyed by instructor then slot
///
/// Seeded with each instructor's `max_per_slot` for every slot they are
/// available in. Entries that were never seeded have zero capacity.
/// A table belongs to a single assignment run.
#[derive(Debug, Clone, Default)]
pub struct CapacityTable<'a> {
    seats: HashMap<&'a str, HashMap<Slot, u32>>,
}

impl<'a> CapacityTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from the instructors' availability
    pub fn seed<I>(instructors: I) -> Self
    where
        I: IntoIterator<Item = &'a Instructor>,
    {
        let mut seats: HashMap<&'a str, HashMap<Slot, u32>> = HashMap::new();
        for instructor in instructors {
            let per_slot = seats.entry(instructor.id.as_str()).or_default();
            for &slot in &instructor.slots {
                per_slot.insert(slot, instructor.max_per_slot);
            }
        }
        Self { seats }
    }

    /// Seats still open for an instructor in a slot
    #[inline]
    pub fn remaining(&self, instructor_id: &str, slot: Slot) -> u32 {
        self.seats
            .get(instructor_id)
            .and_then(|per_slot| per_slot.get(&slot))
            .copied()
            .unwrap_or(0)
    }

    /// Take one seat, returning how many were open before the decrement.
    ///
    /// Returns `None` and leaves the table untouched when no seat is open.
    pub fn take(&mut self, instructor_id: &str, slot: Slot) -> Option<u32> {
        let seats = self.seats.get_mut(instructor_id)?.get_mut(&slot)?;
        if *seats == 0 {
            return None;
        }
        let before = *seats;
        *seats -= 1;
        Some(before)
    }

    /// Total open seats across all instructors and slots
    pub fn total_remaining(&self) -> u64 {
        self.seats
            .values()
            .flat_map(|per_slot| per_slot.values())
            .map(|&n| u64::from(n))
            .sum()
    }
}
