use crate::core::roster::Roster;
use crate::models::{Instructor, InstructorRecord, Learner, LearnerRecord, RawList, RawScalar, Slot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Why an input record was excluded before matching
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record has no id")]
    MissingId,

    #[error("record {0} has no name")]
    MissingName(String),

    #[error("duplicate id: {0}")]
    DuplicateId(String),

    #[error("record {id} has invalid seats per slot: {value}")]
    InvalidCapacity { id: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Learner,
    Instructor,
}

/// A record dropped during normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub kind: RecordKind,
    /// Position of the record in its input list
    pub index: usize,
    pub reason: String,
}

/// Normalized roster together with the records that did not make it in
#[derive(Debug, Clone)]
pub struct Normalized {
    pub roster: Roster,
    pub rejected: Vec<Rejection>,
}

/// Title-case a token the way spreadsheet cleanup does:
/// the first letter of every alphabetic run is upper-cased, the rest lower-cased.
pub fn title_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut in_word = false;
    for c in token.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Trimmed, title-cased, non-empty subject tags
pub fn parse_subjects(raw: &RawList) -> BTreeSet<String> {
    raw.tokens()
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(title_case)
        .collect()
}

/// Known slot names; anything outside the fixed enumeration is dropped
pub fn parse_slots(raw: &RawList) -> BTreeSet<Slot> {
    raw.tokens()
        .into_iter()
        .filter_map(|token| title_case(token.trim()).parse::<Slot>().ok())
        .collect()
}

fn required(field: &Option<RawScalar>) -> Option<String> {
    field.as_ref().and_then(RawScalar::as_text)
}

pub fn normalize_learner(record: &LearnerRecord) -> Result<Learner, RecordError> {
    let id = required(&record.id).ok_or(RecordError::MissingId)?;
    let name = required(&record.name).ok_or_else(|| RecordError::MissingName(id.clone()))?;

    Ok(Learner {
        id,
        name,
        subjects: parse_subjects(&record.subjects),
        slots: parse_slots(&record.preferred_slots),
    })
}

/// Normalize an instructor, applying `default_max_per_slot` when the record has none
pub fn normalize_instructor(
    record: &InstructorRecord,
    default_max_per_slot: u32,
) -> Result<Instructor, RecordError> {
    let id = required(&record.id).ok_or(RecordError::MissingId)?;
    let name = required(&record.name).ok_or_else(|| RecordError::MissingName(id.clone()))?;
    let max_per_slot = match &record.max_per_slot {
        None => default_max_per_slot,
        Some(raw) => raw.as_count().ok_or_else(|| RecordError::InvalidCapacity {
            id: id.clone(),
            value: raw.to_string(),
        })?,
    };

    Ok(Instructor {
        id,
        name,
        subjects: parse_subjects(&record.subjects),
        slots: parse_slots(&record.available_slots),
        max_per_slot,
    })
}

/// Normalize both record lists into a roster
///
/// Malformed records and repeated ids are dropped and reported; the
/// surviving records keep their input order.
pub fn normalize_roster(
    learners: &[LearnerRecord],
    instructors: &[InstructorRecord],
    default_max_per_slot: u32,
) -> Normalized {
    let mut rejected = Vec::new();

    let learners = keep_valid(
        RecordKind::Learner,
        learners.iter().map(normalize_learner),
        |learner: &Learner| learner.id.clone(),
        &mut rejected,
    );
    let instructors = keep_valid(
        RecordKind::Instructor,
        instructors
            .iter()
            .map(|record| normalize_instructor(record, default_max_per_slot)),
        |instructor: &Instructor| instructor.id.clone(),
        &mut rejected,
    );

    tracing::debug!(
        "Normalized {} learners and {} instructors ({} rejected)",
        learners.len(),
        instructors.len(),
        rejected.len()
    );

    Normalized {
        roster: Roster::new(learners, instructors),
        rejected,
    }
}

fn keep_valid<T>(
    kind: RecordKind,
    results: impl Iterator<Item = Result<T, RecordError>>,
    id_of: impl Fn(&T) -> String,
    rejected: &mut Vec<Rejection>,
) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for (index, result) in results.enumerate() {
        let outcome = result.and_then(|item| {
            let id = id_of(&item);
            if seen.insert(id.clone()) {
                Ok(item)
            } else {
                Err(RecordError::DuplicateId(id))
            }
        });

        match outcome {
            Ok(item) => kept.push(item),
            Err(e) => {
                tracing::warn!("Dropping {:?} record at index {}: {}", kind, index, e);
                rejected.push(Rejection {
                    kind,
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner_record(id: Option<&str>, name: Option<&str>, subjects: &str, slots: &str) -> LearnerRecord {
        LearnerRecord {
            id: id.map(Into::into),
            name: name.map(Into::into),
            subjects: subjects.into(),
            preferred_slots: slots.into(),
        }
    }

    fn instructor_record(id: &str, max_per_slot: Option<RawScalar>) -> InstructorRecord {
        InstructorRecord {
            id: Some(id.into()),
            name: Some(format!("Instructor {}", id).into()),
            subjects: "Math".into(),
            available_slots: "Morning".into(),
            max_per_slot,
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("math"), "Math");
        assert_eq!(title_case("COMPUTER science"), "Computer Science");
        assert_eq!(title_case("eVENING"), "Evening");
        assert_eq!(title_case("k-12 math"), "K-12 Math");
    }

    #[test]
    fn test_parse_subjects() {
        let subjects = parse_subjects(&" math , English,, MATH ".into());
        let expected: BTreeSet<String> = ["English".to_string(), "Math".to_string()].into();
        assert_eq!(subjects, expected);
    }

    #[test]
    fn test_parse_slots_drops_unknown() {
        let slots = parse_slots(&"morning, Night , EVENING, lunch".into());
        assert_eq!(slots, BTreeSet::from([Slot::Morning, Slot::Evening]));
    }

    #[test]
    fn test_parse_slots_from_array() {
        let raw = RawList::Items(vec!["afternoon".to_string(), "Morning, evening".to_string()]);
        assert_eq!(parse_slots(&raw), BTreeSet::from(Slot::ALL));
    }

    #[test]
    fn test_learner_missing_id_or_name() {
        let record = learner_record(None, Some("Ada"), "Math", "Morning");
        assert_eq!(normalize_learner(&record), Err(RecordError::MissingId));

        let record = learner_record(Some("S1"), Some("   "), "Math", "Morning");
        assert_eq!(normalize_learner(&record), Err(RecordError::MissingName("S1".to_string())));
    }

    #[test]
    fn test_instructor_default_capacity() {
        let instructor = normalize_instructor(&instructor_record("T1", None), 2).unwrap();
        assert_eq!(instructor.max_per_slot, 2);

        let instructor = normalize_instructor(&instructor_record("T1", Some(4.into())), 2).unwrap();
        assert_eq!(instructor.max_per_slot, 4);
    }

    #[test]
    fn test_normalize_roster_reports_rejections() {
        let learners = vec![
            learner_record(Some("S1"), Some("Ada"), "Math", "Morning"),
            learner_record(None, Some("Nobody"), "Math", "Morning"),
            learner_record(Some("S1"), Some("Ada again"), "Math", "Morning"),
            learner_record(Some("S2"), Some("Chinedu"), "Science", "Afternoon"),
        ];
        let instructors = vec![instructor_record("T1", None)];

        let normalized = normalize_roster(&learners, &instructors, 2);

        let ids: Vec<&str> = normalized
            .roster
            .learners()
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, vec!["S1", "S2"]);
        assert_eq!(normalized.roster.learner("S1").unwrap().name, "Ada");
        assert_eq!(normalized.rejected.len(), 2);
        assert_eq!(normalized.rejected[0].index, 1);
        assert_eq!(normalized.rejected[1].reason, "duplicate id: S1");
        assert!(normalized.rejected.iter().all(|r| r.kind == RecordKind::Learner));
    }

    #[test]
    fn test_numeric_id_and_whole_float_capacity() {
        let record = InstructorRecord {
            id: Some(RawScalar::Integer(7)),
            max_per_slot: Some(RawScalar::Float(2.0)),
            ..instructor_record("unused", None)
        };
        let instructor = normalize_instructor(&record, 1).unwrap();
        assert_eq!(instructor.id, "7");
        assert_eq!(instructor.max_per_slot, 2);
    }

    #[test]
    fn test_invalid_capacity_rejects_only_that_record() {
        let instructors = vec![
            instructor_record("T1", Some(RawScalar::Float(2.5))),
            instructor_record("T2", Some(RawScalar::Integer(-1))),
            instructor_record("T3", Some(RawScalar::Float(3.0))),
        ];

        let normalized = normalize_roster(&[], &instructors, 2);

        assert_eq!(normalized.roster.instructors().len(), 1);
        assert_eq!(normalized.roster.instructor("T3").map(|i| i.max_per_slot), Some(3));
        assert_eq!(normalized.rejected.len(), 2);
        assert_eq!(normalized.rejected[0].reason, "record T1 has invalid seats per slot: 2.5");
        assert_eq!(normalized.rejected[1].index, 1);
        assert!(normalized.rejected.iter().all(|r| r.kind == RecordKind::Instructor));
    }

    #[test]
    fn test_unusable_id_is_missing() {
        let record = LearnerRecord {
            id: Some(RawScalar::Unusable(serde::de::IgnoredAny)),
            ..learner_record(None, Some("Ada"), "Math", "Morning")
        };
        assert_eq!(normalize_learner(&record), Err(RecordError::MissingId));
    }
}
