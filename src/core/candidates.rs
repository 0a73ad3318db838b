use crate::core::{availability::shared_slots, scoring::{common_subjects, subject_compatibility}};
use crate::models::{Candidate, Instructor, Learner};

/// Enumerate every viable (learner, instructor, slot) triple
///
/// Walks learners, then instructors, then shared slots in enumeration order.
/// A pair contributes one candidate per shared slot when its score is
/// positive and the slot overlap is non-empty. Each candidate's `order`
/// records its position in this walk.
pub fn enumerate_candidates<'a>(
    learners: &'a [Learner],
    instructors: &'a [Instructor],
) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();

    for learner in learners {
        for instructor in instructors {
            let score = subject_compatibility(&learner.subjects, &instructor.subjects);
            if score <= 0.0 {
                continue;
            }

            let slots = shared_slots(&learner.slots, &instructor.slots);
            if slots.is_empty() {
                continue;
            }

            let subjects = common_subjects(&learner.subjects, &instructor.subjects);
            for slot in slots {
                candidates.push(Candidate {
                    learner,
                    instructor,
                    slot,
                    score,
                    common_subjects: subjects.clone(),
                    order: candidates.len(),
                });
            }
        }
    }

    candidates
}
