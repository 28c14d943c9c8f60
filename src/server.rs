//! JSON HTTP server over the vault.
//!
//! Exposes the vault operations as a small JSON API. Every handler is
//! stateless: it re-opens the vault and re-reads the directory per request,
//! so a response never reflects a stale listing. The only shared state is
//! the parsed configuration behind an `Arc`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`    | `/health` | Health check (returns version) |
//! | `GET`    | `/documents` | Filtered, sorted listing (`?type=&date=&q=`) |
//! | `POST`   | `/documents` | Upload a document (base64 content) |
//! | `GET`    | `/documents/{name}` | Download raw bytes |
//! | `POST`   | `/documents/{name}/rename` | Rename a document |
//! | `DELETE` | `/documents/{name}` | Delete a document |
//! | `GET`    | `/share` | Render the share link |
//!
//! # Error Contract
//!
//! All error responses carry a machine-readable code and a message:
//!
//! ```json
//! { "error": { "code": "name_in_use", "message": "a file with this name already exists: b" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `name_in_use` (409),
//! `delete_failed` (500), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a browser-based UI
//! can call the API directly.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::Engine;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::listing::list_documents;
use crate::models::{DocType, DocumentName, TypeFilter, VaultEvent};
use crate::share::share_link;
use crate::store::Vault;
use crate::upload::build_globset;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
}

/// Starts the HTTP server. Binds to the address configured in
/// `[server].bind` and runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    // Fail on an unusable vault directory at startup rather than on the
    // first request.
    Vault::open(&config.vault.dir)?;

    let state = AppState {
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/documents", get(handle_list).post(handle_upload))
        .route(
            "/documents/{name}",
            get(handle_download).delete(handle_delete),
        )
        .route("/documents/{name}/rename", post(handle_rename))
        .route("/share", get(handle_share))
        .layer(cors)
        .with_state(state);

    println!("docvault server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
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

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
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

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn name_in_use(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::CONFLICT,
        code: "name_in_use".to_string(),
        message: message.into(),
    }
}

fn internal(code: &str, message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: code.to_string(),
        message: message.into(),
    }
}

/// Maps store errors to HTTP status codes by message. The store reports
/// each failure class with a distinct message, so handlers stay free of a
/// custom error type.
fn classify_store_error(err: anyhow::Error) -> AppError {
    let msg = err.to_string();

    if msg.contains("not found") {
        not_found(msg)
    } else if msg.contains("already exists") {
        name_in_use(msg)
    } else if msg.contains("could not delete") {
        internal("delete_failed", msg)
    } else if msg.contains("invalid") || msg.contains("must not be empty") {
        bad_request(msg)
    } else {
        internal("internal", msg)
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

// ============ GET /documents ============

#[derive(Deserialize)]
struct ListParams {
    /// Type filter: `All` (default) or one of the four document types.
    #[serde(rename = "type")]
    doc_type: Option<String>,
    /// Date filter, `YYYY-MM-DD`. Absent means no date filter.
    date: Option<String>,
    /// Case-insensitive substring search.
    q: Option<String>,
}

#[derive(Serialize)]
struct ListResponse {
    documents: Vec<DocumentName>,
    count: usize,
}

async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, AppError> {
    let type_filter = match params.doc_type.as_deref() {
        None => TypeFilter::All,
        Some(raw) => TypeFilter::parse(raw)
            .ok_or_else(|| bad_request(format!("unknown document type: {}", raw)))?,
    };

    let date = parse_date_param(params.date.as_deref())?;
    let search = params.q.unwrap_or_default();

    let documents = list_documents(&state.config, type_filter, date, &search)
        .map_err(classify_store_error)?;
    let count = documents.len();
    Ok(Json(ListResponse { documents, count }))
}

fn parse_date_param(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| bad_request(format!("invalid date (expected YYYY-MM-DD): {}", s))),
    }
}

// ============ POST /documents ============

#[derive(Deserialize)]
struct UploadRequest {
    /// File bytes, base64-encoded.
    content_base64: String,
    /// One of the four document types, display or filename form.
    doc_type: String,
    /// Document date; today when absent.
    date: Option<String>,
    /// Optional custom label; the sanitized original name is used otherwise.
    custom_name: Option<String>,
    /// Original upload filename, used for the label fallback.
    original_name: String,
}

#[derive(Serialize)]
struct MutationResponse {
    name: String,
    event: VaultEvent,
}

async fn handle_upload(
    State(state): State<AppState>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let doc_type = DocType::parse(&req.doc_type)
        .ok_or_else(|| bad_request(format!("unknown document type: {}", req.doc_type)))?;

    let date = parse_date_param(req.date.as_deref())?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    if req.original_name.trim().is_empty() {
        return Err(bad_request("no file selected: original_name is empty"));
    }

    let include_set = build_globset(&state.config.upload.include_globs)
        .map_err(|e| internal("internal", e.to_string()))?;
    if !include_set.is_match(&req.original_name) {
        return Err(bad_request(format!(
            "unsupported file type: {}",
            req.original_name
        )));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&req.content_base64)
        .map_err(|e| bad_request(format!("invalid base64 content: {}", e)))?;

    let vault = Vault::open(&state.config.vault.dir).map_err(classify_store_error)?;
    let (name, event) = vault
        .upload(
            &bytes,
            date,
            doc_type,
            req.custom_name.as_deref(),
            &req.original_name,
        )
        .map_err(classify_store_error)?;

    Ok(Json(MutationResponse { name, event }))
}

// ============ GET /documents/{name} ============

async fn handle_download(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let vault = Vault::open(&state.config.vault.dir).map_err(classify_store_error)?;
    let bytes = vault.read(&name).map_err(classify_store_error)?;

    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", name),
        ),
    ];
    Ok((headers, bytes).into_response())
}

// ============ POST /documents/{name}/rename ============

#[derive(Deserialize)]
struct RenameRequest {
    new_name: String,
}

async fn handle_rename(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let vault = Vault::open(&state.config.vault.dir).map_err(classify_store_error)?;
    let (new_name, event) = vault
        .rename(&name, &req.new_name)
        .map_err(classify_store_error)?;
    Ok(Json(MutationResponse {
        name: new_name,
        event,
    }))
}

// ============ DELETE /documents/{name} ============

#[derive(Serialize)]
struct DeleteResponse {
    deleted: String,
    event: VaultEvent,
}

async fn handle_delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let vault = Vault::open(&state.config.vault.dir).map_err(classify_store_error)?;
    let event = vault.delete(&name).map_err(classify_store_error)?;
    Ok(Json(DeleteResponse {
        deleted: name,
        event,
    }))
}

// ============ GET /share ============

#[derive(Serialize)]
struct ShareResponse {
    url: String,
}

async fn handle_share(State(state): State<AppState>) -> Json<ShareResponse> {
    Json(ShareResponse {
        url: share_link(&state.config),
    })
}
