// Integration tests for Job Scout

use actix_web::{test, web, App};
use async_trait::async_trait;
use job_scout::config::ProvidersSettings;
use job_scout::core::{FallbackGenerator, JobAggregator, SearchQuery};
use job_scout::models::{Listing, SearchJobsResponse};
use job_scout::routes::{self, jobs::AppState};
use job_scout::services::provider::is_absolute_http;
use job_scout::services::{build_providers, AdzunaProvider, JobProvider, ProviderError};
use mockito::Matcher;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

const DESCRIPTION: &str =
    "We are looking for a Software Engineer with Python and JavaScript experience";

/// Never answers within any reasonable timeout
struct StalledProvider;

#[async_trait]
impl JobProvider for StalledProvider {
    fn name(&self) -> &'static str {
        "Stalled"
    }

    async fn search(&self, _: &str, _: &str, _: usize) -> Result<Vec<Listing>, ProviderError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(vec![])
    }
}

fn adzuna_body(count: usize) -> String {
    let results: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "title": format!("Software Engineer {}", i),
                "company": {"display_name": "Tech Corp"},
                "location": {"display_name": "New York"},
                "description": "Job description",
                "redirect_url": format!("https://example.com/job{}", i),
                "salary_min": 80000,
                "salary_max": 120000,
                "created": "2024-01-01"
            })
        })
        .collect();
    json!({ "results": results }).to_string()
}

async fn adzuna_server(count: usize) -> (mockito::ServerGuard, mockito::Mock) {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/api/jobs/us/search/1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(adzuna_body(count))
        .create_async()
        .await;
    (server, mock)
}

fn adzuna(base_url: String) -> Arc<dyn JobProvider> {
    Arc::new(
        AdzunaProvider::new(
            base_url,
            Some("test_app_id".into()),
            Some("test_app_key".into()),
            "us".into(),
            Duration::from_secs(5),
        )
        .unwrap(),
    )
}

#[tokio::test]
async fn test_integration_timeout_does_not_block_other_provider() {
    let (server, _mock) = adzuna_server(3).await;
    let aggregator = JobAggregator::new(
        vec![adzuna(server.url()), Arc::new(StalledProvider)],
        FallbackGenerator::default(),
        Duration::from_millis(200),
    );

    let query = SearchQuery::new(DESCRIPTION, Some("New York"), None).unwrap();
    let result = aggregator.aggregate(&query).await.unwrap();

    assert_eq!(result.listings.len(), 3);
    assert!(!result.is_fallback);
    assert_eq!(result.provider_errors.len(), 1);
    assert_eq!(result.provider_errors[0].source, "Stalled");
    assert_eq!(result.provider_errors[0].error, "request timed out");
}

#[tokio::test]
async fn test_integration_fallback_scenario() {
    let aggregator = JobAggregator::new(vec![], FallbackGenerator::default(), Duration::from_secs(1));
    let query = SearchQuery::new(
        "We need a Senior Backend Engineer skilled in distributed systems and Kubernetes",
        None,
        Some(&json!(5)),
    )
    .unwrap();

    let result = aggregator.aggregate(&query).await.unwrap();

    assert!(result.is_fallback);
    assert!(result.listings.len() <= 5);
    for listing in &result.listings {
        assert!(listing.description.contains("[FALLBACK]"));
        assert!(listing.is_suggested);
        assert_eq!(listing.source.as_str(), "Suggested");
    }
}

#[tokio::test]
async fn test_integration_results_distinct_bounded_and_absolute() {
    // Same listings from two providers must collapse
    let (first, _m1) = adzuna_server(8).await;
    let (second, _m2) = adzuna_server(8).await;
    let aggregator = JobAggregator::new(
        vec![adzuna(first.url()), adzuna(second.url())],
        FallbackGenerator::default(),
        Duration::from_secs(5),
    );

    for limit in [1, 5, 50] {
        let query = SearchQuery::new(DESCRIPTION, None, Some(&json!(limit))).unwrap();
        let result = aggregator.aggregate(&query).await.unwrap();

        assert!(result.listings.len() <= limit);
        let keys: HashSet<_> = result
            .listings
            .iter()
            .map(|l| (l.title.to_lowercase(), l.company.to_lowercase()))
            .collect();
        assert_eq!(keys.len(), result.listings.len());
        assert!(result.listings.iter().all(|l| is_absolute_http(&l.url)));
    }
}

#[tokio::test]
async fn test_integration_repeated_calls_are_stable() {
    let (server, _mock) = adzuna_server(4).await;
    let aggregator = JobAggregator::new(
        vec![adzuna(server.url())],
        FallbackGenerator::default(),
        Duration::from_secs(5),
    );
    let query = SearchQuery::new(DESCRIPTION, None, None).unwrap();

    let first = aggregator.aggregate(&query).await.unwrap();
    let second = aggregator.aggregate(&query).await.unwrap();

    let urls = |r: &job_scout::AggregationResult| r.listings.iter().map(|l| l.url.clone()).collect::<Vec<_>>();
    assert_eq!(urls(&first), urls(&second));
    assert_eq!(first.search_query, second.search_query);
}

#[tokio::test]
async fn test_integration_registry_skips_uncredentialed() {
    let mut settings = ProvidersSettings::default();
    settings.serpapi.api_key = Some("serp".into());

    let providers = build_providers(&settings, Duration::from_secs(1));
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].name(), "SerpAPI");
}

#[actix_web::test]
async fn test_integration_search_endpoint_with_diagnostics() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/api/jobs/us/search/1")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let aggregator = JobAggregator::new(
        vec![adzuna(server.url())],
        FallbackGenerator::default(),
        Duration::from_secs(5),
    );
    let state = AppState {
        aggregator: Arc::new(aggregator),
        diagnostics: true,
    };

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/search")
        .set_json(json!({
            "jobDescription": DESCRIPTION,
            "location": "New York",
            "limit": "5"
        }))
        .to_request();
    let body: SearchJobsResponse = test::call_and_read_body_json(&app, req).await;

    assert!(body.success);
    assert!(body.data.is_fallback);
    assert_eq!(body.data.count, 5);
    assert_eq!(body.data.location, "New York");
    assert_eq!(body.data.search_query, "Software Engineer");

    let errors = body.errors.expect("diagnostics should include provider errors");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source, "Adzuna");
    assert!(errors[0].error.contains("500"));
}

#[actix_web::test]
async fn test_integration_search_endpoint_rejects_short_description() {
    let aggregator = JobAggregator::new(vec![], FallbackGenerator::default(), Duration::from_secs(1));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState {
                aggregator: Arc::new(aggregator),
                diagnostics: false,
            }))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/jobs/search")
        .set_json(json!({"jobDescription": "too short"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Job description is required and must be at least 10 characters"
    );
}
