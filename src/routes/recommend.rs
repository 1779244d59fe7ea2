use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{Recommender, RecommendError};
use crate::models::{
    DonorSummaryResponse, ErrorResponse, HealthResponse, MatchEntry, RecommendRequest,
    RecommendResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub max_top_n: usize,
}

/// Configure all donor-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/donors/summary", web::get().to(donor_summary))
        .route("/donors/recommend", web::post().to(recommend_donors));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        donors_loaded: state.recommender.donors().len(),
    })
}

/// Loaded donor table summary
///
/// GET /api/v1/donors/summary
async fn donor_summary(state: web::Data<AppState>) -> impl Responder {
    let donors = state.recommender.donors();
    HttpResponse::Ok().json(DonorSummaryResponse {
        columns: donors.columns.clone(),
        donor_count: donors.len(),
        missing_columns: donors.missing_required_columns(),
    })
}

/// Recommend donors endpoint
///
/// POST /api/v1/donors/recommend
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "bloodGroupNeeded": "O+",
///   "age": 42,
///   "location": "string",
///   "urgency": 7,
///   "limit": 3
/// }
/// ```
async fn recommend_donors(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let top_n = req
        .limit
        .map(usize::from)
        .unwrap_or_else(|| state.recommender.default_top_n())
        .min(state.max_top_n);

    let query = req.to_query();

    tracing::info!(
        "Recommending donors for {} (blood group: {}, limit: {})",
        query.name,
        query.blood_group_needed,
        top_n
    );

    match state.recommender.recommend_top(&query, top_n) {
        Ok(result) => HttpResponse::Ok().json(RecommendResponse {
            recipient: query.name,
            matches: result.matches.into_iter().map(MatchEntry::from).collect(),
            total_donors: result.total_donors,
            skipped_rows: result.skipped,
            warning: result.warning.map(|w| w.to_string()),
        }),
        Err(RecommendError::Feature(e)) => {
            HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: format!("Column '{}' not usable in the donor dataset", e.field()),
                message: e.to_string(),
                status_code: 422,
            })
        }
        Err(RecommendError::Model(e)) => {
            tracing::error!("Scoring failed for {}: {}", query.name, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Scoring failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
