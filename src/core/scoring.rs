use std::collections::BTreeSet;

/// Calculate the subject compatibility (0-1) between a learner and an instructor
///
/// Jaccard similarity of the two subject sets:
/// score = |A ∩ B| / |A ∪ B|
///
/// Returns 0.0 when either set is empty.
#[inline]
pub fn subject_compatibility(learner: &BTreeSet<String>, instructor: &BTreeSet<String>) -> f64 {
    if learner.is_empty() || instructor.is_empty() {
        return 0.0;
    }

    let shared = learner.intersection(instructor).count();
    // |A ∪ B| = |A| + |B| - |A ∩ B|, never zero here
    let union = learner.len() + instructor.len() - shared;

    shared as f64 / union as f64
}

/// Subjects taught by the instructor that the learner asked for, in sorted order
#[inline]
pub fn common_subjects<'a>(
    learner: &'a BTreeSet<String>,
    instructor: &'a BTreeSet<String>,
) -> Vec<&'a str> {
    learner
        .intersection(instructor)
        .map(String::as_str)
        .collect()
}

/// Round a score to 3 decimal places for display, ties to even
#[inline]
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round_ties_even() / 1000.0
}
