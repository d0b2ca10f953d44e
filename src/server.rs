//! HTTP JSON API for batch lookups.
//!
//! Endpoints:
//! - `POST /api/lookup` - batch reputation lookup
//! - `GET /status` - JSON counters for lookups served so far
//! - `GET /metrics` - Prometheus-compatible metrics
//!
//! Only batch-level validation problems produce error responses; DNS
//! failures and per-address processing failures are carried inside the
//! 200 response body as negative statuses or per-address error records.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::batch::run_batch;
use crate::config::Config;
use crate::dns::HickoryDns;
use crate::error_handling::ProcessingStats;
use crate::initialization::init_resolver;
use crate::lookup::LookupContext;
use crate::validation::validate_batch;

/// Shared state for the API server.
#[derive(Clone)]
pub struct ApiState {
    /// Lookup pipeline context shared by all requests.
    pub ctx: Arc<LookupContext>,
    /// Concurrency bound applied to each batch.
    pub max_concurrency: usize,
    /// Batches served since startup.
    pub batches_served: Arc<AtomicUsize>,
    /// Addresses whose pipeline completed.
    pub addresses_completed: Arc<AtomicUsize>,
    /// Addresses whose pipeline failed (timeout/panic slots).
    pub addresses_failed: Arc<AtomicUsize>,
    /// Server start time, for uptime and rate reporting.
    pub start_time: Arc<Instant>,
}

impl ApiState {
    /// Builds server state around an existing lookup context.
    pub fn new(ctx: Arc<LookupContext>, max_concurrency: usize) -> Self {
        Self {
            ctx,
            max_concurrency,
            batches_served: Arc::new(AtomicUsize::new(0)),
            addresses_completed: Arc::new(AtomicUsize::new(0)),
            addresses_failed: Arc::new(AtomicUsize::new(0)),
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// Batch lookup request body.
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    /// Address candidates, validated as a whole batch.
    pub ips: Vec<String>,
}

/// JSON response for `/status`.
#[derive(Serialize)]
struct StatusResponse {
    batches_served: usize,
    addresses_completed: usize,
    addresses_failed: usize,
    dns_errors: usize,
    addresses_listed: usize,
    uptime_seconds: f64,
    addresses_per_second: f64,
}

fn error_response(code: StatusCode, message: &str) -> Response {
    (code, Json(serde_json::json!({ "error": message }))).into_response()
}

/// `POST /api/lookup` - runs the lookup pipeline over a batch of addresses.
async fn lookup_handler(
    State(state): State<ApiState>,
    payload: Result<Json<LookupRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid request body: {rejection}"),
            );
        }
    };

    let addresses = match validate_batch(&request.ips) {
        Ok(addresses) => addresses,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let outcomes = run_batch(&addresses, Arc::clone(&state.ctx), state.max_concurrency).await;

    let completed = outcomes.iter().filter(|o| o.is_completed()).count();
    state.batches_served.fetch_add(1, Ordering::SeqCst);
    state
        .addresses_completed
        .fetch_add(completed, Ordering::SeqCst);
    state
        .addresses_failed
        .fetch_add(outcomes.len() - completed, Ordering::SeqCst);

    (StatusCode::OK, Json(outcomes)).into_response()
}

/// `GET /status` - JSON counters.
async fn status_handler(State(state): State<ApiState>) -> Response {
    let completed = state.addresses_completed.load(Ordering::SeqCst);
    let elapsed = state.start_time.elapsed().as_secs_f64();
    let rate = if elapsed > 0.0 {
        completed as f64 / elapsed
    } else {
        0.0
    };

    let response = StatusResponse {
        batches_served: state.batches_served.load(Ordering::SeqCst),
        addresses_completed: completed,
        addresses_failed: state.addresses_failed.load(Ordering::SeqCst),
        dns_errors: state.ctx.stats.total_errors(),
        addresses_listed: state
            .ctx
            .stats
            .get_info_count(crate::error_handling::InfoType::AddressListed),
        uptime_seconds: elapsed,
        addresses_per_second: rate,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// `GET /metrics` - Prometheus-compatible metrics.
async fn metrics_handler(State(state): State<ApiState>) -> Response {
    let metrics = format!(
        r#"# HELP ip_reputation_batches_served Total lookup batches served
# TYPE ip_reputation_batches_served counter
ip_reputation_batches_served {}

# HELP ip_reputation_addresses_completed Addresses whose lookup pipeline completed
# TYPE ip_reputation_addresses_completed counter
ip_reputation_addresses_completed {}

# HELP ip_reputation_addresses_failed Addresses whose lookup pipeline failed
# TYPE ip_reputation_addresses_failed counter
ip_reputation_addresses_failed {}

# HELP ip_reputation_dns_errors_total DNS sub-check failures recovered as negative statuses
# TYPE ip_reputation_dns_errors_total counter
ip_reputation_dns_errors_total {}
"#,
        state.batches_served.load(Ordering::SeqCst),
        state.addresses_completed.load(Ordering::SeqCst),
        state.addresses_failed.load(Ordering::SeqCst),
        state.ctx.stats.total_errors(),
    );

    (StatusCode::OK, metrics).into_response()
}

/// Builds the API router over prepared state.
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/lookup", post(lookup_handler))
        .route("/status", get(status_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Creates the lookup context and serves the API until shutdown.
pub async fn start_server(config: &Config) -> Result<()> {
    let stats = Arc::new(ProcessingStats::new());
    let resolver = init_resolver();
    let ctx = Arc::new(LookupContext::new(
        Arc::new(HickoryDns::new(resolver, Arc::clone(&stats))),
        config.dnsbl_zone.clone(),
        stats,
    ));
    let state = ApiState::new(ctx, config.max_concurrency);
    let app = api_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port))
        .await
        .map_err(|e| {
            anyhow::anyhow!("Failed to bind to {}:{}: {}", config.host, config.port, e)
        })?;

    log::info!(
        "Lookup API listening on http://{}:{}/",
        config.host,
        config.port
    );
    log::info!("  - Batch lookup: POST /api/lookup");
    log::info!("  - Status: GET /status");
    log::info!("  - Metrics: GET /metrics");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::testing::MockDns;
    use axum::body::Body;
    use axum::http::Request;
    use std::net::Ipv4Addr;
    use tower::ServiceExt;

    fn test_state(dns: MockDns) -> ApiState {
        let ctx = Arc::new(LookupContext::new(
            Arc::new(dns),
            "dnsbl.test",
            Arc::new(ProcessingStats::new()),
        ));
        ApiState::new(ctx, 4)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_lookup(app: Router, body: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri("/api/lookup")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_rejected_with_400() {
        let app = api_router(test_state(MockDns::new()));
        let response = post_lookup(app, "{not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("Invalid request body"));
    }

    #[tokio::test]
    async fn test_body_without_ips_field_is_rejected_with_400() {
        let app = api_router(test_state(MockDns::new()));
        let response = post_lookup(app, r#"{"addresses": ["192.0.2.1"]}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Invalid request body"));
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let state = test_state(MockDns::new());
        let payload = Ok(Json(LookupRequest { ips: vec![] }));

        let response = lookup_handler(State(state), payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "No IP addresses provided");
    }

    #[tokio::test]
    async fn test_invalid_address_rejects_whole_batch() {
        let state = test_state(MockDns::new());
        let payload = Ok(Json(LookupRequest {
            ips: vec!["10.0.0.1".to_string(), "256.1.1.1".to_string()],
        }));

        let response = lookup_handler(State(state.clone()), payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("256.1.1.1"));
        // Nothing was processed.
        assert_eq!(state.batches_served.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_batch_returns_results_in_order() {
        let listed = Ipv4Addr::new(192, 0, 2, 1);
        let dns = MockDns::new().with_blocklist(
            "1.2.0.192.dnsbl.test",
            vec![Ipv4Addr::new(127, 0, 0, 2)],
        );
        let state = test_state(dns);
        let payload = Ok(Json(LookupRequest {
            ips: vec![listed.to_string(), "198.51.100.4".to_string()],
        }));

        let response = lookup_handler(State(state.clone()), payload).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        let results = json.as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["ip"], "192.0.2.1");
        assert_eq!(results[1]["ip"], "198.51.100.4");
        assert_eq!(results[0]["listStatuses"][0]["status"], "On the list");
        assert_eq!(results[1]["listStatuses"][0]["status"], "Not on the list");
        assert_eq!(
            results[0]["standardsCompliance"]["reverseHostname"],
            "Failed!"
        );
        assert_eq!(state.batches_served.load(Ordering::SeqCst), 1);
        assert_eq!(state.addresses_completed.load(Ordering::SeqCst), 2);
    }
}
