use crate::core::roster::Roster;
use crate::core::scoring::round_score;
use crate::models::{LessonType, Match, Slot};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Aggregate statistics over a finished schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    #[serde(rename = "totalLearners")]
    pub total_learners: usize,
    #[serde(rename = "matchedLearners")]
    pub matched_learners: usize,
    #[serde(rename = "unmatchedLearners")]
    pub unmatched_learners: usize,
    /// Percentage of learners with a lesson
    #[serde(rename = "matchingRate")]
    pub matching_rate: f64,
    #[serde(rename = "totalLessons")]
    pub total_lessons: usize,
    #[serde(rename = "lessonTypes")]
    pub lesson_types: BTreeMap<LessonType, usize>,
    #[serde(rename = "instructorUtilization")]
    pub instructor_utilization: Utilization,
    #[serde(rename = "slotDistribution")]
    pub slot_distribution: BTreeMap<Slot, usize>,
    #[serde(rename = "averageScore")]
    pub average_score: Option<f64>,
    #[serde(rename = "minScore")]
    pub min_score: Option<f64>,
    #[serde(rename = "maxScore")]
    pub max_score: Option<f64>,
    #[serde(rename = "subjectCoverage")]
    pub subject_coverage: SubjectCoverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    #[serde(rename = "totalInstructors")]
    pub total_instructors: usize,
    #[serde(rename = "utilizedInstructors")]
    pub utilized_instructors: usize,
    #[serde(rename = "utilizationRate")]
    pub utilization_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectCoverage {
    #[serde(rename = "totalSubjects")]
    pub total_subjects: usize,
    #[serde(rename = "coveredSubjects")]
    pub covered_subjects: usize,
    #[serde(rename = "coverageRate")]
    pub coverage_rate: f64,
}

impl ScheduleMetrics {
    /// Compute metrics for `matches` produced from `roster`
    pub fn compute(roster: &Roster, matches: &[Match]) -> Self {
        let total_learners = roster.learners().len();
        let matched_learners = matches
            .iter()
            .map(|m| m.learner_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut lesson_types = BTreeMap::new();
        let mut slot_distribution = BTreeMap::new();
        for m in matches {
            *lesson_types.entry(m.lesson_type).or_insert(0) += 1;
            *slot_distribution.entry(m.slot).or_insert(0) += 1;
        }

        let total_instructors = roster.instructors().len();
        let utilized_instructors = matches
            .iter()
            .map(|m| m.instructor_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        // Learner subjects against what the schedule actually covers
        let all_subjects: BTreeSet<&str> = roster
            .learners()
            .iter()
            .flat_map(|l| l.subjects.iter().map(String::as_str))
            .collect();
        let covered: BTreeSet<&str> = matches
            .iter()
            .flat_map(|m| m.subjects.split(", "))
            .filter(|s| !s.is_empty())
            .collect();

        let (average_score, min_score, max_score) = score_stats(matches);

        Self {
            total_learners,
            matched_learners,
            unmatched_learners: total_learners.saturating_sub(matched_learners),
            matching_rate: percentage(matched_learners, total_learners),
            total_lessons: matches.len(),
            lesson_types,
            instructor_utilization: Utilization {
                total_instructors,
                utilized_instructors,
                utilization_rate: percentage(utilized_instructors, total_instructors),
            },
            slot_distribution,
            average_score,
            min_score,
            max_score,
            subject_coverage: SubjectCoverage {
                total_subjects: all_subjects.len(),
                covered_subjects: covered.len(),
                coverage_rate: percentage(covered.len(), all_subjects.len()),
            },
        }
    }
}

/// `part / whole` as a percentage with 2 decimals; 0.0 when `whole` is 0
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let pct = part as f64 / whole as f64 * 100.0;
    (pct * 100.0).round_ties_even() / 100.0
}

fn score_stats(matches: &[Match]) -> (Option<f64>, Option<f64>, Option<f64>) {
    if matches.is_empty() {
        return (None, None, None);
    }

    let sum: f64 = matches.iter().map(|m| m.score).sum();
    let min = matches.iter().map(|m| m.score).fold(f64::INFINITY, f64::min);
    let max = matches.iter().map(|m| m.score).fold(f64::NEG_INFINITY, f64::max);

    (
        Some(round_score(sum / matches.len() as f64)),
        Some(round_score(min)),
        Some(round_score(max)),
    )
}
