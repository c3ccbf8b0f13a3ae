use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::models::ModelTable;
use crate::relay::{self, ByteStream, RelayBody};
use crate::translate::firebender_types::MessagesRequest;
use crate::translate::request::firebender_to_openai;
use crate::translate::response::openai_to_firebender;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub config: ProxyConfig,
    pub models: ModelTable,
    pub client: reqwest::Client,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/messages", post(handle_messages))
        .route("/v1/chat/completions", post(handle_chat_completions))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "firebender2itp",
    }))
}

/// Firebender-schema endpoint: resolve the model, translate the request,
/// relay, and reshape the response. Streamed responses are forwarded in the
/// backend's native chunk framing.
async fn handle_messages(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let req: MessagesRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => return bad_request(&e),
    };

    let target_model = state.models.resolve(&req.model);
    let openai_req = firebender_to_openai(&req, &target_model);

    tracing::info!(
        model = %openai_req.model,
        stream = openai_req.stream,
        messages = openai_req.messages.len(),
        "Messages request"
    );

    match relay::forward(&openai_req, openai_req.stream, &state.config, &state.client).await {
        Ok(RelayBody::Stream(chunks)) => stream_response(chunks),
        Ok(RelayBody::Full(bytes)) => {
            let raw: serde_json::Value = match serde_json::from_slice(&bytes) {
                Ok(v) => v,
                Err(e) => {
                    tracing::error!(error = %e, "Backend body is not JSON");
                    return error_response(ProxyError::Json(e));
                }
            };
            Json(openai_to_firebender(raw, state.models.base_model())).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Backend-schema endpoint: the caller already speaks chat completions, so
/// only the model field is rewritten; the backend body comes back verbatim,
/// streamed or whole.
async fn handle_chat_completions(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let mut payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => return bad_request(&e),
    };

    let requested = payload
        .get("model")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    let target_model = state.models.resolve(requested);

    if let Some(obj) = payload.as_object_mut() {
        obj.insert(
            "model".to_string(),
            serde_json::Value::String(target_model),
        );
    }

    let stream = payload
        .get("stream")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    tracing::info!(stream, "Chat completions request");

    match relay::forward(&payload, stream, &state.config, &state.client).await {
        Ok(RelayBody::Stream(chunks)) => stream_response(chunks),
        Ok(RelayBody::Full(bytes)) => Response::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Err(e) => error_response(e),
    }
}

/// Re-emit the backend's chunk sequence to the caller without buffering.
/// Dropping the response (client disconnect) drops the upstream connection.
fn stream_response(chunks: ByteStream) -> Response {
    Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(chunks))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn bad_request(err: &serde_json::Error) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "detail": format!("Invalid request body: {err}"),
        })),
    )
        .into_response()
}

fn error_response(err: ProxyError) -> Response {
    match err {
        ProxyError::Upstream { status, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(serde_json::json!({ "detail": body }))).into_response()
        }
        ProxyError::Unavailable { message } => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "detail": format!("Service Unavailable: {message}"),
            })),
        )
            .into_response(),
        other => {
            tracing::error!(error = %other, "Relay failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "detail": other.to_string() })),
            )
                .into_response()
        }
    }
}
