// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, Instructor, Learner, LessonType, Match, ScheduleEntry, Slot};
pub use requests::{InstructorRecord, LearnerRecord, RawList, RawScalar, ScheduleRequest};
pub use responses::{ErrorResponse, HealthResponse, ScheduleResponse};
