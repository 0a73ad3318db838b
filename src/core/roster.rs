use crate::models::{Instructor, Learner, Match, ScheduleEntry};
use std::collections::HashMap;

/// Learners and instructors in input order, with id lookups built once
///
/// Input order matters: it fixes candidate generation order and therefore
/// the tie-break between equally scored candidates.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    learners: Vec<Learner>,
    instructors: Vec<Instructor>,
    learner_index: HashMap<String, usize>,
    instructor_index: HashMap<String, usize>,
}

impl Roster {
    /// Build a roster. Ids are expected to be unique per kind; on a repeat
    /// the lookup resolves to the first record.
    pub fn new(learners: Vec<Learner>, instructors: Vec<Instructor>) -> Self {
        let mut learner_index = HashMap::with_capacity(learners.len());
        for (i, learner) in learners.iter().enumerate() {
            learner_index.entry(learner.id.clone()).or_insert(i);
        }

        let mut instructor_index = HashMap::with_capacity(instructors.len());
        for (i, instructor) in instructors.iter().enumerate() {
            instructor_index.entry(instructor.id.clone()).or_insert(i);
        }

        Self {
            learners,
            instructors,
            learner_index,
            instructor_index,
        }
    }

    pub fn learners(&self) -> &[Learner] {
        &self.learners
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    pub fn learner(&self, id: &str) -> Option<&Learner> {
        self.learner_index.get(id).map(|&i| &self.learners[i])
    }

    pub fn instructor(&self, id: &str) -> Option<&Instructor> {
        self.instructor_index.get(id).map(|&i| &self.instructors[i])
    }

    /// Attach display names to each match, keeping match order
    pub fn schedule_view(&self, matches: &[Match]) -> Vec<ScheduleEntry> {
        matches
            .iter()
            .map(|m| ScheduleEntry {
                learner_id: m.learner_id.clone(),
                learner_name: self
                    .learner(&m.learner_id)
                    .map(|l| l.name.clone())
                    .unwrap_or_default(),
                instructor_id: m.instructor_id.clone(),
                instructor_name: self
                    .instructor(&m.instructor_id)
                    .map(|i| i.name.clone())
                    .unwrap_or_default(),
                slot: m.slot,
                lesson_type: m.lesson_type,
                subjects: m.subjects.clone(),
                score: m.score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LessonType, Slot};
    use std::collections::BTreeSet;

    fn roster() -> Roster {
        let learners = vec![Learner {
            id: "S1".to_string(),
            name: "Ada".to_string(),
            subjects: BTreeSet::from(["Math".to_string()]),
            slots: BTreeSet::from([Slot::Morning]),
        }];
        let instructors = vec![Instructor {
            id: "T1".to_string(),
            name: "Mr. Obi".to_string(),
            subjects: BTreeSet::from(["Math".to_string()]),
            slots: BTreeSet::from([Slot::Morning]),
            max_per_slot: 2,
        }];
        Roster::new(learners, instructors)
    }

    #[test]
    fn test_lookup_by_id() {
        let roster = roster();
        assert_eq!(roster.learner("S1").map(|l| l.name.as_str()), Some("Ada"));
        assert_eq!(roster.instructor("T1").map(|i| i.max_per_slot), Some(2));
        assert!(roster.learner("T1").is_none());
    }

    #[test]
    fn test_schedule_view_adds_names() {
        let roster = roster();
        let matches = vec![Match {
            learner_id: "S1".to_string(),
            instructor_id: "T1".to_string(),
            slot: Slot::Morning,
            lesson_type: LessonType::OneToOne,
            subjects: "Math".to_string(),
            score: 1.0,
        }];

        let view = roster.schedule_view(&matches);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].learner_name, "Ada");
        assert_eq!(view[0].instructor_name, "Mr. Obi");
        assert_eq!(view[0].lesson_type, LessonType::OneToOne);
    }
}
