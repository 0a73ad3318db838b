// Core algorithm exports
pub mod availability;
pub mod candidates;
pub mod capacity;
pub mod matcher;
pub mod metrics;
pub mod normalize;
pub mod roster;
pub mod scoring;

pub use availability::shared_slots;
pub use candidates::enumerate_candidates;
pub use capacity::CapacityTable;
pub use matcher::{classify_lesson, rank_candidates, Matcher, MatchResult};
pub use metrics::ScheduleMetrics;
pub use normalize::{normalize_instructor, normalize_learner, normalize_roster, Normalized, RecordError, Rejection};
pub use roster::Roster;
pub use scoring::{common_subjects, subject_compatibility};
