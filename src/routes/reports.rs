use actix_web::{web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use validator::Validate;

use crate::core::analytics;
use crate::models::{ErrorResponse, ReportQuery};
use crate::routes::recommendations::AppState;
use crate::services::CacheKey;

const REPORT_KINDS: &[&str] = &[
    "trend",
    "ranking",
    "facilities",
    "coordinators",
    "failures",
    "dashboard",
];

/// Configure analytics report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/reports/facility/{id}", web::get().to(get_facility_report))
        .route(
            "/reports/coordinator/{id}",
            web::get().to(get_coordinator_report),
        )
        .route("/reports/{kind}", web::get().to(get_report));
}

/// Analytics report endpoint
///
/// GET /api/v1/reports/{kind}?days=N
///
/// Kinds: trend, ranking, facilities, coordinators, failures, dashboard.
/// Reports are computed over records created in the last `days` days and
/// served through the TTL cache; history writes invalidate it.
async fn get_report(
    state: web::Data<AppState>,
    kind: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> impl Responder {
    let kind = kind.into_inner();

    if !REPORT_KINDS.contains(&kind.as_str()) {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Unknown report kind".to_string(),
            message: format!("Report kind must be one of: {}", REPORT_KINDS.join(", ")),
            status_code: 400,
        });
    }

    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let days = query.days;
    let cache_key = CacheKey::report(&kind, days);

    if let Ok(cached) = state.cache.get::<serde_json::Value>(&cache_key).await {
        tracing::debug!("Serving {} report from cache", kind);
        return HttpResponse::Ok().json(cached);
    }

    let now = Utc::now();
    let since = now - Duration::days(days as i64);

    let records = match state.store.created_since(since).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Failed to load match history for {} report: {}", kind, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load match history".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let report = match kind.as_str() {
        "trend" => serde_json::to_value(analytics::trend_report(&records, days, now)),
        "ranking" => serde_json::to_value(analytics::ranking_report(&records, days)),
        "facilities" => serde_json::to_value(analytics::facility_performance_report(&records, days)),
        "coordinators" => {
            serde_json::to_value(analytics::coordinator_performance_report(&records, days))
        }
        "failures" => serde_json::to_value(analytics::failure_analysis_report(&records, days)),
        "dashboard" => serde_json::to_value(analytics::dashboard_report(&records, now)),
        _ => unreachable!("kind checked above"),
    };

    let report = match report {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Failed to serialize {} report: {}", kind, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to serialize report".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    if let Err(e) = state.cache.set(&cache_key, &report).await {
        tracing::warn!("Failed to cache {} report: {}", kind, e);
    }

    HttpResponse::Ok().json(report)
}

/// Performance drill-down for a single facility
///
/// GET /api/v1/reports/facility/{id}?days=N
async fn get_facility_report(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let facility_id = id.into_inner();
    let days = query.days;
    let since = Utc::now() - Duration::days(days as i64);

    let records = match state.store.history_for_facility(&facility_id).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Failed to load history for facility {}: {}", facility_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load match history".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let windowed: Vec<_> = records.into_iter().filter(|r| r.created_at >= since).collect();
    HttpResponse::Ok().json(analytics::facility_performance_report(&windowed, days))
}

/// Performance drill-down for a single coordinator
///
/// GET /api/v1/reports/coordinator/{id}?days=N
async fn get_coordinator_report(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<ReportQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let coordinator_id = id.into_inner();
    let days = query.days;
    let since = Utc::now() - Duration::days(days as i64);

    let records = match state.store.history_for_coordinator(&coordinator_id).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(
                "Failed to load history for coordinator {}: {}",
                coordinator_id,
                e
            );
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load match history".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let windowed: Vec<_> = records.into_iter().filter(|r| r.created_at >= since).collect();
    HttpResponse::Ok().json(analytics::coordinator_performance_report(&windowed, days))
}
