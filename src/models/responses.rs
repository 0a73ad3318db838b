use serde::{Deserialize, Serialize};
use crate::core::metrics::ScheduleMetrics;
use crate::core::normalize::Rejection;
use crate::models::domain::ScheduleEntry;

/// Response for the schedule endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub matches: Vec<ScheduleEntry>,
    #[serde(rename = "unmatchedLearnerIds")]
    pub unmatched_learner_ids: Vec<String>,
    pub rejected: Vec<Rejection>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    pub metrics: ScheduleMetrics,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
