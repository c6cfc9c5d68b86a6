use axum::{
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::CatalogStore;
use crate::cli::{ServeArgs, SourceArgs};
use crate::core::types::DEFAULT_THRESHOLD;
use crate::matching::engine::{SearchConfig, SearchEngine, SearchHit};
use crate::utils::validation::{validate_keyword, validate_threshold, ValidationError};

/// Maximum concurrent requests served
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Request timeout; a refresh waits on the remote source, so this is generous
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Shared application state
pub struct AppState {
    pub store: CatalogStore,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

#[derive(Deserialize)]
struct SearchParams {
    /// Keyword to search for
    q: Option<String>,
    /// Minimum score (0-100)
    threshold: Option<u8>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn validation_error_response(error: &ValidationError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(create_safe_error_response(
            "invalid_input",
            &error.to_string(),
            None,
        )),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs, source: &SourceArgs) -> anyhow::Result<()> {
    let store = source.open_store();
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, store).await })
}

/// Routes without the network-facing middleware
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/search", get(search_handler))
        .route("/api/debug", get(debug_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/refresh", post(refresh_handler))
        .with_state(state)
}

/// Create the application router with all routes and middleware configured.
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
pub fn create_router(state: Arc<AppState>) -> Router {
    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .unwrap();

    api_router(state).layer(
        ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            // IP-based rate limiting to prevent abuse
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(REQUEST_TIMEOUT_SECS),
            ))
            // Limit concurrent requests to prevent DOS
            .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS)),
    )
}

async fn run_server(args: ServeArgs, store: CatalogStore) -> anyhow::Result<()> {
    let state = Arc::new(AppState { store });

    // Initial load happens once, before accepting requests
    let outcome = state.store.load(false).await;
    if outcome.is_failure() {
        tracing::warn!("Starting with an empty catalog");
    }
    println!("Catalog ready with {} songs", state.store.song_count());

    let app = create_router(state);

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting song-resolver web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/catalog"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn hit_json(hit: &SearchHit<'_>) -> serde_json::Value {
    serde_json::json!({
        "score": hit.score,
        "tier": hit.tier,
        "song": hit.song,
    })
}

/// API endpoint for ranked search
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let keyword = params.q.unwrap_or_default();
    if let Err(e) = validate_keyword(&keyword) {
        return validation_error_response(&e);
    }
    let threshold = match validate_threshold(params.threshold.unwrap_or(DEFAULT_THRESHOLD)) {
        Ok(t) => t,
        Err(e) => return validation_error_response(&e),
    };

    let start_time = std::time::Instant::now();
    let snapshot = state.store.snapshot();
    let engine = SearchEngine::with_config(snapshot.songs(), SearchConfig { threshold });
    let hits = engine.rank(&keyword);

    #[allow(clippy::cast_possible_truncation)] // Processing time won't exceed u64
    let processing_time = start_time.elapsed().as_millis() as u64;

    Json(serde_json::json!({
        "keyword": keyword.trim().to_lowercase(),
        "threshold": threshold,
        "catalog_size": snapshot.len(),
        "matches": hits.iter().map(hit_json).collect::<Vec<_>>(),
        "processing_time_ms": processing_time,
    }))
    .into_response()
}

/// API endpoint for the debug score preview
async fn debug_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let keyword = params.q.unwrap_or_default();
    if let Err(e) = validate_keyword(&keyword) {
        return validation_error_response(&e);
    }

    let snapshot = state.store.snapshot();
    let hits = SearchEngine::new(snapshot.songs()).debug_scores(&keyword);

    Json(serde_json::json!({
        "keyword": keyword.trim().to_lowercase(),
        "scores": hits.iter().map(hit_json).collect::<Vec<_>>(),
    }))
    .into_response()
}

/// API endpoint for catalog status
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let versions = state.store.versions();
    Json(serde_json::json!({
        "state": state.store.state(),
        "song_count": state.store.song_count(),
        "versions": versions
            .iter()
            .map(|(version, title)| serde_json::json!({"version": version, "title": title}))
            .collect::<Vec<_>>(),
    }))
}

/// API endpoint forcing a remote refresh
async fn refresh_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.store.fetch().await {
        Ok(report) => Json(serde_json::json!({
            "song_count": state.store.song_count(),
            "report": report,
        }))
        .into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(create_safe_error_response(
                "refresh_failed",
                "Catalog refresh failed; the catalog is now empty",
                Some(&e.to_string()),
            )),
        )
            .into_response(),
    }
}
