use crate::core::{
    candidates::enumerate_candidates,
    capacity::CapacityTable,
    roster::Roster,
    scoring::round_score,
};
use crate::models::{Candidate, LessonType, Match};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Result of an assignment run
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Matches in the order they were assigned
    pub matches: Vec<Match>,
    pub total_candidates: usize,
    /// Learners left without a lesson, in roster order
    pub unmatched_learner_ids: Vec<String>,
}

/// Greedy, score-priority lesson assigner
///
/// # Pipeline Stages
/// 1. Candidate enumeration (learners x instructors x shared slots)
/// 2. Ranking by score, ties broken by generation order
/// 3. Single pass over the ranking against the capacity table
///
/// Every learner receives at most one match and no (instructor, slot)
/// pair is filled beyond the instructor's `max_per_slot`. This is not a
/// maximum-cardinality matching: a learner can stay unmatched when the
/// seats they could use were taken by higher-scored candidates first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Build the schedule for a roster
    ///
    /// All state (capacity, assigned learners) lives for this call only, so
    /// repeated runs over the same roster return identical results.
    pub fn assign(&self, roster: &Roster) -> MatchResult {
        // Stage 1: every viable (learner, instructor, slot)
        let mut candidates = enumerate_candidates(roster.learners(), roster.instructors());
        let total_candidates = candidates.len();

        // Stage 2: ranking
        rank_candidates(&mut candidates);

        // Stage 3: consume against capacity
        let mut capacity = CapacityTable::seed(roster.instructors());
        let mut assigned: HashSet<&str> = HashSet::with_capacity(roster.learners().len());
        let mut matches = Vec::new();

        for candidate in &candidates {
            let learner_id = candidate.learner.id.as_str();
            if assigned.contains(learner_id) {
                continue;
            }

            let Some(open_before) = capacity.take(&candidate.instructor.id, candidate.slot) else {
                continue;
            };

            let lesson_type = classify_lesson(candidate.instructor.max_per_slot, open_before);
            matches.push(Match {
                learner_id: learner_id.to_string(),
                instructor_id: candidate.instructor.id.clone(),
                slot: candidate.slot,
                lesson_type,
                subjects: candidate.common_subjects.join(", "),
                score: round_score(candidate.score),
            });
            assigned.insert(learner_id);
        }

        let unmatched_learner_ids: Vec<String> = roster
            .learners()
            .iter()
            .filter(|learner| !assigned.contains(learner.id.as_str()))
            .map(|learner| learner.id.clone())
            .collect();

        tracing::debug!(
            "Assignment run: {} candidates, {} matches, {} unmatched, {} seats left",
            total_candidates,
            matches.len(),
            unmatched_learner_ids.len(),
            capacity.total_remaining()
        );

        MatchResult {
            matches,
            total_candidates,
            unmatched_learner_ids,
        }
    }
}

/// Sort candidates by score (descending), then by generation order (ascending)
pub fn rank_candidates(candidates: &mut [Candidate<'_>]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.order.cmp(&b.order))
    });
}

/// Lesson type for a seat taken when `open_before` seats were still open.
///
/// The first seat consumed in an (instructor, slot) is labelled one-to-one,
/// every later seat in that slot is a group seat. Single-seat instructors
/// always teach one-to-one.
#[inline]
pub fn classify_lesson(max_per_slot: u32, open_before: u32) -> LessonType {
    if max_per_slot == 1 || open_before == max_per_slot {
        LessonType::OneToOne
    } else {
        LessonType::Group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Instructor, Learner, Slot};
    use std::collections::HashMap;

    fn create_learner(id: &str, subjects: &[&str], slots: &[Slot]) -> Learner {
        Learner {
            id: id.to_string(),
            name: format!("Learner {}", id),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            slots: slots.iter().copied().collect(),
        }
    }

    fn create_instructor(id: &str, subjects: &[&str], slots: &[Slot], max_per_slot: u32) -> Instructor {
        Instructor {
            id: id.to_string(),
            name: format!("Instructor {}", id),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            slots: slots.iter().copied().collect(),
            max_per_slot,
        }
    }

    #[test]
    fn test_classify_lesson() {
        assert_eq!(classify_lesson(1, 1), LessonType::OneToOne);
        assert_eq!(classify_lesson(2, 2), LessonType::OneToOne);
        assert_eq!(classify_lesson(2, 1), LessonType::Group);
        assert_eq!(classify_lesson(3, 1), LessonType::Group);
    }

    #[test]
    fn test_first_seat_one_to_one_then_group() {
        let roster = Roster::new(
            vec![
                create_learner("A", &["Math", "English"], &[Slot::Morning]),
                create_learner("B", &["Math"], &[Slot::Morning]),
            ],
            vec![create_instructor("X", &["Math", "English"], &[Slot::Morning], 2)],
        );

        let result = Matcher::new().assign(&roster);

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].learner_id, "A");
        assert_eq!(result.matches[0].score, 1.0);
        assert_eq!(result.matches[0].lesson_type, LessonType::OneToOne);
        assert_eq!(result.matches[1].learner_id, "B");
        assert_eq!(result.matches[1].score, 0.5);
        assert_eq!(result.matches[1].lesson_type, LessonType::Group);
        assert!(result.unmatched_learner_ids.is_empty());
    }

    #[test]
    fn test_capacity_respected() {
        let learners: Vec<Learner> = (0..5)
            .map(|i| create_learner(&format!("S{}", i), &["Math"], &[Slot::Morning]))
            .collect();
        let roster = Roster::new(
            learners,
            vec![create_instructor("T1", &["Math"], &[Slot::Morning], 3)],
        );

        let result = Matcher::new().assign(&roster);

        assert_eq!(result.matches.len(), 3);
        assert_eq!(result.unmatched_learner_ids, vec!["S3", "S4"]);
    }

    #[test]
    fn test_learner_assigned_once() {
        let roster = Roster::new(
            vec![create_learner("S1", &["Math"], &Slot::ALL)],
            vec![
                create_instructor("T1", &["Math"], &Slot::ALL, 2),
                create_instructor("T2", &["Math"], &Slot::ALL, 2),
            ],
        );

        let result = Matcher::new().assign(&roster);

        assert_eq!(result.total_candidates, 6);
        assert_eq!(result.matches.len(), 1);
        // Equal scores: the first generated candidate wins
        assert_eq!(result.matches[0].instructor_id, "T1");
        assert_eq!(result.matches[0].slot, Slot::Morning);
    }

    #[test]
    fn test_higher_score_wins_seat() {
        let roster = Roster::new(
            vec![
                create_learner("S1", &["Math", "Art"], &[Slot::Morning]),
                create_learner("S2", &["Math"], &[Slot::Morning]),
            ],
            vec![create_instructor("T1", &["Math"], &[Slot::Morning], 1)],
        );

        let result = Matcher::new().assign(&roster);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].learner_id, "S2");
        assert_eq!(result.unmatched_learner_ids, vec!["S1"]);
    }

    #[test]
    fn test_zero_capacity_instructor_never_matched() {
        let roster = Roster::new(
            vec![create_learner("S1", &["Math"], &[Slot::Morning])],
            vec![
                create_instructor("Y", &["Math"], &[Slot::Morning], 0),
                create_instructor("Z", &["Math", "Art"], &[Slot::Morning], 2),
            ],
        );

        let result = Matcher::new().assign(&roster);

        assert_eq!(result.total_candidates, 2);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].instructor_id, "Z");
    }

    #[test]
    fn test_greedy_can_leave_learner_unmatched() {
        // S1 takes T1's only seat with a perfect score although S1 could also
        // use T2 in the evening; S2 can only use T1 and ends up unmatched.
        let roster = Roster::new(
            vec![
                create_learner("S1", &["Math"], &[Slot::Morning, Slot::Evening]),
                create_learner("S2", &["Math", "Art"], &[Slot::Morning]),
            ],
            vec![
                create_instructor("T1", &["Math"], &[Slot::Morning], 1),
                create_instructor("T2", &["Math", "Science"], &[Slot::Evening], 1),
            ],
        );

        let result = Matcher::new().assign(&roster);

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].learner_id, "S1");
        assert_eq!(result.matches[0].instructor_id, "T1");
        assert_eq!(result.unmatched_learner_ids, vec!["S2"]);
    }

    #[test]
    fn test_one_to_one_label_once_per_slot() {
        let learners: Vec<Learner> = (0..6)
            .map(|i| create_learner(&format!("S{}", i), &["Math"], &[Slot::Morning, Slot::Evening]))
            .collect();
        let roster = Roster::new(
            learners,
            vec![create_instructor("T1", &["Math"], &[Slot::Morning, Slot::Evening], 3)],
        );

        let result = Matcher::new().assign(&roster);

        assert_eq!(result.matches.len(), 6);
        let mut one_to_one: HashMap<Slot, usize> = HashMap::new();
        for m in &result.matches {
            if m.lesson_type == LessonType::OneToOne {
                *one_to_one.entry(m.slot).or_default() += 1;
            }
        }
        assert_eq!(one_to_one.get(&Slot::Morning), Some(&1));
        assert_eq!(one_to_one.get(&Slot::Evening), Some(&1));
    }

    #[test]
    fn test_empty_roster() {
        let result = Matcher::new().assign(&Roster::default());
        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 0);
    }
}
