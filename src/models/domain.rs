use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Coarse time-of-day bucket a lesson can be held in.
///
/// Variant order is the enumeration order used when iterating slot sets,
/// which keeps candidate generation reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    Morning,
    Afternoon,
    Evening,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Morning, Slot::Afternoon, Slot::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Morning => "Morning",
            Slot::Afternoon => "Afternoon",
            Slot::Evening => "Evening",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a token is not one of the fixed slot names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time slot: {0}")]
pub struct UnknownSlot(pub String);

impl FromStr for Slot {
    type Err = UnknownSlot;

    /// Parses an already title-cased slot name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| UnknownSlot(s.to_string()))
    }
}

/// A learner looking for a lesson, after input normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Learner {
    pub id: String,
    pub name: String,
    pub subjects: BTreeSet<String>,
    pub slots: BTreeSet<Slot>,
}

/// An instructor offering lessons, after input normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: String,
    pub name: String,
    pub subjects: BTreeSet<String>,
    pub slots: BTreeSet<Slot>,
    #[serde(rename = "maxPerSlot")]
    pub max_per_slot: u32,
}

/// A possible (learner, instructor, slot) assignment produced by the enumerator.
///
/// `order` is the position in generation order and is the tie-break when
/// two candidates share a score.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub learner: &'a Learner,
    pub instructor: &'a Instructor,
    pub slot: Slot,
    pub score: f64,
    pub common_subjects: Vec<&'a str>,
    pub order: usize,
}

/// Lesson type decided at assignment time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LessonType {
    #[serde(rename = "1:1")]
    OneToOne,
    Group,
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LessonType::OneToOne => f.write_str("1:1"),
            LessonType::Group => f.write_str("Group"),
        }
    }
}

/// A confirmed assignment in the final schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "learnerId")]
    pub learner_id: String,
    #[serde(rename = "instructorId")]
    pub instructor_id: String,
    pub slot: Slot,
    #[serde(rename = "lessonType")]
    pub lesson_type: LessonType,
    pub subjects: String,
    pub score: f64,
}

/// A match enriched with display names for reporting collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(rename = "learnerId")]
    pub learner_id: String,
    #[serde(rename = "learnerName")]
    pub learner_name: String,
    #[serde(rename = "instructorId")]
    pub instructor_id: String,
    #[serde(rename = "instructorName")]
    pub instructor_name: String,
    pub slot: Slot,
    #[serde(rename = "lessonType")]
    pub lesson_type: LessonType,
    pub subjects: String,
    pub score: f64,
}
