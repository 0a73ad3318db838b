use crate::models::Slot;
use std::collections::BTreeSet;

/// Time slots both parties can attend
///
/// Iterates in slot enumeration order. An empty result means the pair
/// cannot be scheduled together.
#[inline]
pub fn shared_slots(learner: &BTreeSet<Slot>, instructor: &BTreeSet<Slot>) -> Vec<Slot> {
    learner.intersection(instructor).copied().collect()
}
