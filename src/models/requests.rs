use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// A list field that may arrive as comma-delimited text or as a JSON array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawList {
    Text(String),
    Items(Vec<String>),
    /// `null`, numbers and other shapes carry no usable tokens
    #[serde(skip_serializing)]
    Unusable(IgnoredAny),
}

impl Default for RawList {
    fn default() -> Self {
        RawList::Items(Vec::new())
    }
}

impl RawList {
    /// Raw tokens before trimming or case normalization
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            RawList::Text(text) => text.split(',').collect(),
            RawList::Items(items) => items.iter().flat_map(|item| item.split(',')).collect(),
            RawList::Unusable(_) => Vec::new(),
        }
    }
}

impl From<&str> for RawList {
    fn from(text: &str) -> Self {
        RawList::Text(text.to_string())
    }
}

/// A scalar field as exported by spreadsheets and data frames
///
/// Ids may be numbers and capacities may be floats such as `2.0`; the
/// normalizer decides per record whether the value is usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Integer(i64),
    Float(f64),
    #[serde(skip_serializing)]
    Unusable(IgnoredAny),
}

impl RawScalar {
    /// Trimmed text form; integral numbers print without a fraction
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawScalar::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            RawScalar::Integer(n) => Some(n.to_string()),
            RawScalar::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{:.0}", f)),
            RawScalar::Float(f) if f.is_finite() => Some(f.to_string()),
            RawScalar::Float(_) | RawScalar::Unusable(_) => None,
        }
    }

    /// Non-negative whole number that fits in `u32`
    pub fn as_count(&self) -> Option<u32> {
        match self {
            RawScalar::Integer(n) => u32::try_from(*n).ok(),
            RawScalar::Float(f) => whole_count(*f),
            RawScalar::Text(text) => {
                let text = text.trim();
                text.parse::<u32>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(whole_count))
            }
            RawScalar::Unusable(_) => None,
        }
    }
}

fn whole_count(value: f64) -> Option<u32> {
    if value.is_finite() && value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawScalar::Text(text) => write!(f, "{:?}", text),
            RawScalar::Integer(n) => write!(f, "{}", n),
            RawScalar::Float(x) => write!(f, "{}", x),
            RawScalar::Unusable(_) => write!(f, "a non-scalar value"),
        }
    }
}

impl From<&str> for RawScalar {
    fn from(text: &str) -> Self {
        RawScalar::Text(text.to_string())
    }
}

impl From<String> for RawScalar {
    fn from(text: String) -> Self {
        RawScalar::Text(text)
    }
}

impl From<u32> for RawScalar {
    fn from(n: u32) -> Self {
        RawScalar::Integer(n.into())
    }
}

/// Learner record as supplied by the data loader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearnerRecord {
    #[serde(default, alias = "student_id", alias = "learner_id")]
    pub id: Option<RawScalar>,
    #[serde(default)]
    pub name: Option<RawScalar>,
    #[serde(default)]
    pub subjects: RawList,
    #[serde(default, rename = "preferredSlots", alias = "preferred_time_slots")]
    pub preferred_slots: RawList,
}

/// Instructor record as supplied by the data loader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstructorRecord {
    #[serde(default, alias = "teacher_id", alias = "instructor_id")]
    pub id: Option<RawScalar>,
    #[serde(default)]
    pub name: Option<RawScalar>,
    #[serde(default)]
    pub subjects: RawList,
    #[serde(default, rename = "availableSlots", alias = "available_time_slots")]
    pub available_slots: RawList,
    #[serde(default, rename = "maxPerSlot", alias = "max_students_per_slot")]
    pub max_per_slot: Option<RawScalar>,
}

/// Request to build a schedule
///
/// Each list is capped at 10 000 records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ScheduleRequest {
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub learners: Vec<LearnerRecord>,
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub instructors: Vec<InstructorRecord>,
}
