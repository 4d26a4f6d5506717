use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::core::{adjust_with_history, Matcher, MatchError};
use crate::models::{
    ActionResponse, CompleteMatchRequest, ErrorResponse, HealthResponse, MatchRecord,
    RecommendRequest, RecommendResponse, RecordActionRequest,
};
use crate::services::{CacheManager, DirectoryClient, DirectoryError, MatchStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryClient>,
    pub store: Arc<MatchStore>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
}

/// Tracking actions a user can take on a recommendation.
#[derive(Debug, Clone, Copy)]
enum ActionKind {
    Viewed,
    Contacted,
    Visited,
}

impl ActionKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "viewed" => Some(ActionKind::Viewed),
            "contacted" => Some(ActionKind::Contacted),
            "visited" => Some(ActionKind::Visited),
            _ => None,
        }
    }
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommendations/find", web::post().to(find_recommendations))
        .route("/recommendations/action", web::post().to(record_action))
        .route(
            "/recommendations/complete",
            web::post().to(complete_matching),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Compute and persist a ranked recommendation batch
///
/// POST /api/v1/recommendations/find
///
/// Fetches the user's health profile and candidate facilities from the
/// directory, runs the matching pipeline, optionally re-weights with the
/// user's successful-match history, then persists one match record per
/// recommendation.
async fn find_recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_recommendations: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;
    tracing::info!(
        "Finding recommendations for user: {}, limit: {}",
        user_id,
        req.preference.max_results
    );

    let profile = match state.directory.get_health_profile(user_id).await {
        Ok(profile) => profile,
        Err(DirectoryError::NotFound(msg)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Health profile not found".to_string(),
                message: msg,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch health profile for {}: {}", user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch health profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let candidates = match state
        .directory
        .find_candidates(profile.care_grade_level)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query facility candidates: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query facility candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Directory returned {} candidates for {}", candidates.len(), user_id);

    let result = match state.matcher.recommend(&profile, &req.preference, candidates) {
        Ok(result) => result,
        Err(MatchError::InvalidInput(msg)) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid matching input".to_string(),
                message: msg,
                status_code: 400,
            });
        }
    };

    let mut recommendations = result.recommendations;
    let mut learning_applied = false;

    if req.apply_learning {
        match state.store.history_for_user(user_id).await {
            Ok(history) => {
                recommendations = adjust_with_history(recommendations, &history);
                learning_applied = true;
            }
            Err(e) => {
                // Degrade to the unadjusted ranking rather than failing.
                tracing::warn!("Failed to load history for {}, skipping learning: {}", user_id, e);
            }
        }
    }

    // Persist one record per recommendation so later actions can be tracked.
    let now = Utc::now();
    let criteria = serde_json::json!({
        "profile": &profile,
        "preference": &req.preference,
    });

    let records: Vec<MatchRecord> = recommendations
        .iter()
        .map(|rec| {
            let mut record = MatchRecord::new(
                user_id,
                &rec.facility_id,
                req.coordinator_id.as_deref(),
                rec.match_score * 20.0, // persisted on the 0-100 scale
                rec.rank,
                criteria.clone(),
                serde_json::to_value(rec).unwrap_or(serde_json::Value::Null),
                now,
            );
            record.estimated_cost = rec.estimated_monthly_cost;
            record.facility_type = Some(rec.facility_type.clone());
            record.facility_grade = rec.facility_grade;
            record
        })
        .collect();

    if let Err(e) = state.store.create_batch(&records).await {
        tracing::error!("Failed to persist recommendation batch for {}: {}", user_id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Failed to persist recommendations".to_string(),
            message: e.to_string(),
            status_code: 500,
        });
    }

    if let Err(e) = state.cache.invalidate_reports().await {
        tracing::warn!("Failed to invalidate report cache: {}", e);
    }

    tracing::info!(
        "Returning {} recommendations for user {} (from {} candidates)",
        recommendations.len(),
        user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RecommendResponse {
        recommendations,
        total_candidates: result.total_candidates,
        learning_applied,
    })
}

/// Record a tracking action against the user's most recent record for a
/// facility
///
/// POST /api/v1/recommendations/action
///
/// Best-effort: when no prior match record exists (the user may be
/// browsing without a recommendation) the action is silently skipped.
async fn record_action(
    state: web::Data<AppState>,
    req: web::Json<RecordActionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let action = match ActionKind::parse(&req.action_type) {
        Some(action) => action,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid action type".to_string(),
                message: "Action type must be one of: viewed, contacted, visited".to_string(),
                status_code: 400,
            });
        }
    };

    let record = match state.store.latest_for(&req.user_id, &req.facility_id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            tracing::debug!(
                "No match record for {} -> {}, skipping {:?}",
                req.user_id,
                req.facility_id,
                action
            );
            return HttpResponse::Ok().json(ActionResponse {
                success: true,
                matched: false,
                status: None,
                progress_percent: None,
            });
        }
        Err(e) => {
            tracing::error!("Failed to look up match record: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to look up match record".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let updated = state
        .store
        .update_with(record.id, move |r| {
            let now = Utc::now();
            match action {
                ActionKind::Viewed => r.mark_viewed(now),
                ActionKind::Contacted => r.mark_contacted(now),
                ActionKind::Visited => r.mark_visited(now),
            }
        })
        .await;

    match updated {
        Ok(record) => {
            if let Err(e) = state.cache.invalidate_reports().await {
                tracing::warn!("Failed to invalidate report cache: {}", e);
            }

            HttpResponse::Ok().json(ActionResponse {
                success: true,
                matched: true,
                status: Some(record.status),
                progress_percent: Some(record.progress_percent()),
            })
        }
        Err(e) => {
            tracing::error!("Failed to record action: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record action".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Finish a match with an outcome
///
/// POST /api/v1/recommendations/complete
///
/// Unlike tracking actions, completing against a missing record is an
/// explicit not-found error.
async fn complete_matching(
    state: web::Data<AppState>,
    req: web::Json<CompleteMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let record = match state.store.latest_for(&req.user_id, &req.facility_id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Match record not found".to_string(),
                message: format!(
                    "No match record for user {} and facility {}",
                    req.user_id, req.facility_id
                ),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to look up match record: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to look up match record".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let outcome = req.outcome;
    let actual_cost = req.actual_cost;
    let satisfaction = req.satisfaction_score;
    let feedback = req.feedback.clone();

    let updated = state
        .store
        .update_with(record.id, move |r| {
            r.actual_cost = actual_cost;
            r.satisfaction_score = satisfaction;
            r.feedback = feedback.clone();
            r.mark_selected(outcome, Utc::now());
        })
        .await;

    match updated {
        Ok(record) => {
            if let Err(e) = state.cache.invalidate_reports().await {
                tracing::warn!("Failed to invalidate report cache: {}", e);
            }

            tracing::info!(
                "Completed match {} with outcome {:?} (successful: {})",
                record.id,
                record.outcome,
                record.is_successful_match()
            );

            HttpResponse::Ok().json(ActionResponse {
                success: true,
                matched: true,
                status: Some(record.status),
                progress_percent: Some(record.progress_percent()),
            })
        }
        Err(e) => {
            tracing::error!("Failed to complete match: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to complete match".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_parsing() {
        assert!(matches!(ActionKind::parse("viewed"), Some(ActionKind::Viewed)));
        assert!(matches!(ActionKind::parse("CONTACTED"), Some(ActionKind::Contacted)));
        assert!(matches!(ActionKind::parse("visited"), Some(ActionKind::Visited)));
        assert!(ActionKind::parse("selected").is_none());
    }

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
