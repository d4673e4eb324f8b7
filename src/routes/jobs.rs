use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{JobAggregator, SearchQuery};
use crate::models::{ErrorResponse, HealthResponse, SearchJobsRequest, SearchJobsResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<JobAggregator>,
    /// Expose provider errors in search responses
    pub diagnostics: bool,
}

/// Configure job search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/jobs/search", web::post().to(search_jobs));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let providers: Vec<String> = state
        .aggregator
        .provider_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    // Without providers every search is answered from the fallback generator
    let status = if providers.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        providers,
    })
}

/// Search jobs matching a job description
///
/// POST /api/v1/jobs/search
///
/// Request body:
/// ```json
/// {
///   "jobDescription": "string (>= 10 chars)",
///   "location": "string",
///   "limit": 10
/// }
/// ```
async fn search_jobs(
    state: web::Data<AppState>,
    req: web::Json<SearchJobsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search_jobs request: {}", errors);
        return bad_request(
            "Validation failed",
            crate::models::requests::DESCRIPTION_TOO_SHORT.to_string(),
        );
    }

    let query = match SearchQuery::new(&req.job_description, req.location(), req.limit.as_ref()) {
        Ok(query) => query,
        Err(e) => return bad_request("Validation failed", e.to_string()),
    };

    match state.aggregator.aggregate(&query).await {
        Ok(result) => {
            tracing::info!(
                "Returning {} listings for '{}' (fallback: {}, provider errors: {})",
                result.listings.len(),
                result.search_query,
                result.is_fallback,
                result.provider_errors.len()
            );
            HttpResponse::Ok().json(SearchJobsResponse::from_result(result, state.diagnostics))
        }
        Err(e) => {
            tracing::info!("Search rejected: {}", e);
            bad_request("Invalid job description", e.to_string())
        }
    }
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FallbackGenerator;
    use actix_web::{test, App};
    use std::time::Duration;

    fn state(diagnostics: bool) -> AppState {
        AppState {
            aggregator: Arc::new(JobAggregator::new(
                vec![],
                FallbackGenerator::default(),
                Duration::from_secs(1),
            )),
            diagnostics,
        }
    }

    #[actix_web::test]
    async fn test_health_degraded_without_providers() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(false)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "degraded");
        assert!(body.providers.is_empty());
    }

    #[actix_web::test]
    async fn test_short_description_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(false)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/jobs/search")
            .set_json(serde_json::json!({"jobDescription": "too short"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_non_string_location_treated_as_missing() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(false)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/jobs/search")
            .set_json(serde_json::json!({
                "jobDescription": "Senior Rust Engineer building payment systems",
                "location": 42
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["location"], "Not specified");
    }
}
