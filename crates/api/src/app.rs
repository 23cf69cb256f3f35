use axum::{
    extract::{Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use hotelscope_core::domain::{BasicReport, ExtendedReport};
use hotelscope_core::error::PipelineError;
use hotelscope_core::pipeline::Pipeline;

const MISSING_HOTEL_NAME: &str = "Please provide a hotel name.";

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Option<Pipeline>,
    pub authorized_api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

pub fn router(state: AppState) -> Router {
    let analyze_routes = Router::new()
        .route("/analyze", get(analyze))
        .route("/analyzeApi", get(analyze_extended))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(analyze_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct AnalyzeQuery {
    hotel_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KeyQuery {
    api_key: Option<String>,
}

async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let authorized = match (&state.authorized_api_key, presented_key(&req)) {
        (Some(expected), Some(presented)) => presented == *expected,
        _ => false,
    };

    if !authorized {
        tracing::warn!(path = %req.uri().path(), "rejected unauthorized request");
        return error_response(StatusCode::FORBIDDEN, "Unauthorized").into_response();
    }
    next.run(req).await
}

// `api_key` query parameter first, then the Authorization header (raw or Bearer).
fn presented_key(req: &Request) -> Option<String> {
    if let Ok(Query(q)) = Query::<KeyQuery>::try_from_uri(req.uri()) {
        if let Some(key) = q.api_key.filter(|k| !k.is_empty()) {
            return Some(key);
        }
    }

    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let key = value.strip_prefix("Bearer ").unwrap_or(value);
    Some(key.trim().to_string())
}

fn require_pipeline(state: &AppState) -> Result<&Pipeline, ApiError> {
    state.pipeline.as_ref().ok_or_else(|| {
        error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "analysis backend is not configured",
        )
    })
}

fn require_hotel_name(q: AnalyzeQuery) -> Result<String, ApiError> {
    q.hotel_name
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, MISSING_HOTEL_NAME))
}

fn pipeline_failure(err: anyhow::Error) -> ApiError {
    let status = match PipelineError::kind_of(&err) {
        Some(PipelineError::Validation(_)) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "analysis failed");
    }
    error_response(status, err.to_string())
}

async fn analyze(
    State(state): State<AppState>,
    Query(q): Query<AnalyzeQuery>,
) -> Result<Json<BasicReport>, ApiError> {
    let hotel_name = require_hotel_name(q)?;
    let pipeline = require_pipeline(&state)?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze", %request_id, %hotel_name, report = "basic");
    let report = pipeline
        .basic_report(&hotel_name)
        .instrument(span)
        .await
        .map_err(pipeline_failure)?;

    Ok(Json(report))
}

async fn analyze_extended(
    State(state): State<AppState>,
    Query(q): Query<AnalyzeQuery>,
) -> Result<Json<ExtendedReport>, ApiError> {
    let hotel_name = require_hotel_name(q)?;
    let pipeline = require_pipeline(&state)?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("analyze", %request_id, %hotel_name, report = "extended");
    let report = pipeline
        .extended_report(&hotel_name)
        .instrument(span)
        .await
        .map_err(pipeline_failure)?;

    Ok(Json(report))
}
