use crate::classifier::EmotionClassifier;
use crate::config::LimitsConfig;
use crate::data_model::{SearchHit, Tweet, TweetMetrics, UserInfo};
use crate::error::AnalysisError;
use crate::ingest::load_dataset;
use crate::pipeline::{summary, AnnotationPipeline};
use crate::query::{build_filter_with_limits, build_query};
use crate::store::DocumentStore;
use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Source fields for the plain tweet listing endpoint.
const TWEET_SOURCE_FIELDS: &[&str] =
    &["id", "user", "payload.tweet.content", "meta.created_at", "metrics"];

// The application state, shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub classifier: Arc<dyn EmotionClassifier>,
    pub limits: LimitsConfig,
    pub dataset_path: PathBuf,
}

fn error_response(err: &AnalysisError) -> Response {
    let status = match err {
        AnalysisError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
        AnalysisError::Io { source } if source.kind() == std::io::ErrorKind::NotFound => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "detail": err.to_string() }))).into_response()
}

#[derive(Deserialize, Debug, Default)]
pub struct EmotionRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

async fn emotion_handler(
    State(state): State<AppState>,
    body: Option<Json<EmotionRequest>>,
) -> Response {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let filter = match build_filter_with_limits(
        request.start_date.as_deref(),
        request.end_date.as_deref(),
        request.limit,
        state.limits.default_limit,
        state.limits.max_limit,
    ) {
        Ok(filter) => filter,
        Err(e) => return error_response(&e),
    };

    let pipeline = AnnotationPipeline::new(state.store.clone(), state.classifier.clone());
    match pipeline.run(&filter).await {
        Ok(outcome) => Json(json!({
            "message": summary(&outcome),
            "processed": outcome.successfully_updated,
        }))
        .into_response(),
        Err(e) => {
            error!(error = %e, "Annotation run failed");
            error_response(&e)
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct TweetsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

/// Converts a search hit into the caller-facing tweet shape, tolerating
/// missing user fields the way the ingestion data sometimes arrives.
fn hit_to_tweet(hit: &SearchHit) -> Option<Tweet> {
    let source = &hit.source;
    let content = source["payload"]["tweet"]["content"].as_str()?;

    let metrics: TweetMetrics = source
        .get("metrics")
        .cloned()
        .and_then(|m| serde_json::from_value(m).ok())
        .unwrap_or_default();

    let user = UserInfo {
        username: source["user"]["username"]
            .as_str()
            .unwrap_or("unknown")
            .to_string(),
        handle: source["user"]["handle"].as_str().map(str::to_string),
        verified: source["user"]["verified"].as_bool().unwrap_or(false),
    };

    Some(Tweet {
        id: source["id"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| hit.id.clone()),
        user,
        content: content.to_string(),
        created_at: source["meta"]["created_at"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        metrics,
    })
}

async fn tweets_handler(
    State(state): State<AppState>,
    Query(params): Query<TweetsQuery>,
) -> Response {
    let filter = match build_filter_with_limits(
        params.start_date.as_deref(),
        params.end_date.as_deref(),
        params.limit,
        state.limits.default_limit,
        state.limits.max_limit,
    ) {
        Ok(filter) => filter,
        Err(e) => return error_response(&e),
    };

    let query = build_query(&filter);
    match state
        .store
        .search(&query, TWEET_SOURCE_FIELDS, filter.max_results)
        .await
    {
        Ok(results) => {
            let tweets: Vec<Tweet> = results.hits.iter().filter_map(hit_to_tweet).collect();
            Json(json!({ "total": results.total, "tweets": tweets })).into_response()
        }
        Err(e) => {
            error!(error = %e, "Tweet listing failed");
            error_response(&e)
        }
    }
}

async fn load_tweets_handler(State(state): State<AppState>) -> Response {
    match load_dataset(state.store.as_ref(), &state.dataset_path).await {
        Ok(count) => Json(json!({
            "message": format!("Indexed {} tweets successfully", count)
        }))
        .into_response(),
        Err(e) => {
            error!(error = %e, "Dataset load failed");
            error_response(&e)
        }
    }
}

async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        error!(error = %e, "Could not encode prometheus metrics");
        return (StatusCode::INTERNAL_SERVER_ERROR, "encoding error").into_response();
    }
    (StatusCode::OK, buffer).into_response()
}

/// Logs every request with its method, path, status and duration.
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        duration_secs = format!("{:.2}", started.elapsed().as_secs_f64()),
        "Request handled"
    );
    response
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/emotion", post(emotion_handler))
        .route("/api/v1/tweets", get(tweets_handler))
        .route("/api/v1/load-tweets", post(load_tweets_handler))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Binds and serves the API until the process is torn down.
pub async fn run_server(state: AppState, bind_addr: &str) -> crate::error::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(%bind_addr, "Listening");
    axum::serve(listener, app).await?;
    Ok(())
}
