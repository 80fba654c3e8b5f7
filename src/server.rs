//! HTTP server.
//!
//! Lets a browser-side integration or another service post raw HTML and get
//! the extracted context back, without running the pipeline itself.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `POST` | `/context` | Extract a `PageContext` from `{url, html}` |
//! | `POST` | `/chat/payload` | Build the `ChatRequest` backend body for a page |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "url must not be empty" } }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so pages on any host can
//! call the server directly.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use page_context_core::chat::ChatRequest;
use page_context_core::compose::ContextExtractor;
use page_context_core::models::PageContext;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::html::parse_page;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    extractor: Arc<ContextExtractor>,
}

/// Starts the HTTP server on `[server].bind` and runs until the process exits.
pub async fn run_server(config: &Config, extractor: Arc<ContextExtractor>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("page-context server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(extractor)).await?;
    Ok(())
}

/// Build the router. Exposed so callers can serve it on their own listener.
pub fn router(extractor: Arc<ContextExtractor>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/context", post(handle_context))
        .route("/chat/payload", post(handle_chat_payload))
        .layer(cors)
        .with_state(AppState { extractor })
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /context ============

#[derive(Deserialize)]
struct ContextRequest {
    url: String,
    html: String,
}

fn extract_posted(state: &AppState, url: &str, html: &str) -> Result<PageContext, AppError> {
    if url.trim().is_empty() {
        return Err(bad_request("url must not be empty"));
    }
    let page = parse_page(url, html, state.extractor.tables());
    Ok(state.extractor.extract(&page))
}

async fn handle_context(
    State(state): State<AppState>,
    Json(req): Json<ContextRequest>,
) -> Result<Json<PageContext>, AppError> {
    let context = extract_posted(&state, &req.url, &req.html)?;
    tracing::debug!(url = %context.url, topics = ?context.topics, "context extracted");
    Ok(Json(context))
}

// ============ POST /chat/payload ============

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatPayloadRequest {
    url: String,
    html: String,
    message: String,
    #[serde(default)]
    conversation_id: Option<String>,
    /// Overrides the value derived from `conversationId`.
    #[serde(default)]
    is_first_message: Option<bool>,
}

async fn handle_chat_payload(
    State(state): State<AppState>,
    Json(req): Json<ChatPayloadRequest>,
) -> Result<Json<ChatRequest>, AppError> {
    if req.message.trim().is_empty() {
        return Err(bad_request("message must not be empty"));
    }
    let context = extract_posted(&state, &req.url, &req.html)?;
    let mut request = ChatRequest::new(req.message, context);
    if let Some(id) = req.conversation_id {
        request = request.in_conversation(id);
    }
    if let Some(first) = req.is_first_message {
        request = request.first_message(first);
    }
    Ok(Json(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn spawn_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::new(ContextExtractor::default()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn health_reports_version() {
        let base = spawn_server().await;
        let body: Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn context_extracted_from_posted_html() {
        let base = spawn_server().await;
        let html = "<html><head><title>Altadena insurance claim and policy help</title></head>\
                    <body><h1>Insurance</h1></body></html>";
        let resp = reqwest::Client::new()
            .post(format!("{}/context", base))
            .json(&json!({ "url": "https://x.test/altadena/insurance", "html": html }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["location"]["city"], "Altadena");
        assert_eq!(body["primaryTopic"], "insurance");
        assert_eq!(body["headings"]["h1"], json!(["Insurance"]));
    }

    #[tokio::test]
    async fn empty_url_is_bad_request() {
        let base = spawn_server().await;
        let resp = reqwest::Client::new()
            .post(format!("{}/context", base))
            .json(&json!({ "url": " ", "html": "<p>x</p>" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn chat_payload_returns_request() {
        let base = spawn_server().await;
        let resp = reqwest::Client::new()
            .post(format!("{}/chat/payload", base))
            .json(&json!({
                "url": "https://x.test/glendale",
                "html": "<title>Glendale</title>",
                "message": "What should I do first?",
                "conversationId": "conv-1"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["pageUrl"], "https://x.test/glendale");
        assert_eq!(body["conversationId"], "conv-1");
        assert_eq!(body["isFirstMessage"], false);
        assert_eq!(body["context"]["location"]["city"], "Glendale");
    }

    #[tokio::test]
    async fn chat_payload_honours_explicit_first_flag() {
        let base = spawn_server().await;
        let resp = reqwest::Client::new()
            .post(format!("{}/chat/payload", base))
            .json(&json!({
                "url": "https://x.test/",
                "html": "<title>t</title>",
                "message": "hi",
                "conversationId": "c1",
                "isFirstMessage": true
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["conversationId"], "c1");
        assert_eq!(body["isFirstMessage"], true);
    }
}
