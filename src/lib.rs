//! Lesson Match - learner to instructor lesson scheduling
//!
//! This library provides the allocation engine: subject compatibility
//! scoring, availability intersection and a greedy, capacity-constrained
//! assignment of learners to instructor time slots.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{normalize_roster, subject_compatibility, MatchResult, Matcher, Roster, ScheduleMetrics};
pub use crate::models::{Instructor, InstructorRecord, Learner, LearnerRecord, LessonType, Match, ScheduleEntry, Slot};
