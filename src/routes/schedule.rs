use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{normalize_roster, Matcher, ScheduleMetrics};
use crate::models::{ErrorResponse, HealthResponse, ScheduleRequest, ScheduleResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all schedule-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/schedule", web::post().to(build_schedule));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Build a schedule endpoint
///
/// POST /api/v1/schedule
///
/// Request body:
/// ```json
/// {
///   "learners": [
///     {"id": "S1", "name": "Ada", "subjects": "Math, English", "preferredSlots": "Morning"}
///   ],
///   "instructors": [
///     {"id": "T1", "name": "Mr. Obi", "subjects": ["Math"], "availableSlots": "Morning", "maxPerSlot": 3}
///   ]
/// }
/// ```
async fn build_schedule(
    state: web::Data<AppState>,
    req: web::Json<ScheduleRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for schedule request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request = req.into_inner();
    tracing::info!(
        "Building schedule for {} learners and {} instructors",
        request.learners.len(),
        request.instructors.len()
    );

    let matcher = state.matcher;
    let default_max_per_slot = state.matching.default_max_per_slot;

    // Assignment is CPU bound; keep it off the async workers
    let outcome = web::block(move || {
        let normalized = normalize_roster(
            &request.learners,
            &request.instructors,
            default_max_per_slot,
        );
        let result = matcher.assign(&normalized.roster);
        let metrics = ScheduleMetrics::compute(&normalized.roster, &result.matches);

        ScheduleResponse {
            matches: normalized.roster.schedule_view(&result.matches),
            unmatched_learner_ids: result.unmatched_learner_ids,
            rejected: normalized.rejected,
            total_candidates: result.total_candidates,
            metrics,
        }
    })
    .await;

    match outcome {
        Ok(response) => {
            tracing::info!(
                "Scheduled {} lessons, {} learners unmatched",
                response.matches.len(),
                response.unmatched_learner_ids.len()
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            tracing::error!("Schedule computation failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to build schedule".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
