use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Json, Multipart, Path, State, multipart::MultipartError},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use invex_core::pdf::document_text;
use invex_core::{
    InvexConfig, InvoiceExtractor, InvoiceRecord, JsonLinesStore, MemoryStore, PdfError, Receipt,
    ReceiptStore, RuleBasedExtractor, StoreError,
};

/// Usage text served at the root path.
pub const BANNER: &str = "Invoice extraction service. POST a PDF to /extract as form file 'file'.";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<InvexConfig>,
    pub store: Option<Arc<dyn ReceiptStore>>,
}

impl AppState {
    /// State without a receipt store; extractions are not persisted.
    pub fn new(config: InvexConfig) -> Self {
        Self {
            config: Arc::new(config),
            store: None,
        }
    }

    /// State with the store named by `server.store_path`, or an in-memory one.
    pub fn from_config(config: InvexConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn ReceiptStore> = match &config.server.store_path {
            Some(path) => Arc::new(JsonLinesStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::new(config).with_store(store))
    }

    pub fn with_store(mut self, store: Arc<dyn ReceiptStore>) -> Self {
        self.store = Some(store);
        self
    }
}

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
}

/// Response for the extraction endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// The six extracted fields
    pub invoice_json: InvoiceRecord,
    /// Identifier of the stored receipt, when a store is attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<u64>,
}

/// Application-specific error types for the API
#[derive(Debug)]
pub enum AppError {
    /// Malformed request (missing part, empty filename)
    BadRequest(String),
    /// Multipart body could not be read
    Multipart(MultipartError),
    /// Unknown resource
    NotFound(String),
    /// Uploaded document could not be decoded
    Pdf(PdfError),
    /// Receipt storage failure
    Store(StoreError),
    /// Anything else that went wrong server-side
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_msg) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Multipart(e) => (e.status(), e.body_text()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Pdf(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            warn!("Request failed: {}", error_msg);
        }

        (status, Json(ErrorResponse { error: error_msg })).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Multipart(err)
    }
}

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        AppError::Pdf(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

/// Build the application router with all routes configured
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/extract", post(extract_invoice))
        .route("/receipts", get(list_receipts))
        .route("/receipts/{id}", get(get_receipt))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn index() -> &'static str {
    BANNER
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "invex",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Extract invoice fields from an uploaded PDF (multipart part `file`)
pub async fn extract_invoice(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::BadRequest("Missing file part 'file'".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::BadRequest("Empty filename".to_string()));
    }

    info!("Extracting {} ({} bytes)", filename, data.len());

    // PDF decoding, extraction and the store write all block
    let AppState { config, store } = state;
    let response = tokio::task::spawn_blocking(move || -> Result<ExtractResponse, AppError> {
        let text = document_text(&data, &config.pdf)?;
        debug!("Document text: {} chars", text.len());
        let record = RuleBasedExtractor::from_config(&config.extraction).extract_from_text(&text);

        let receipt_id = match &store {
            Some(store) => Some(store.insert(&filename, record.clone())?.id),
            None => None,
        };
        Ok(ExtractResponse {
            invoice_json: record,
            receipt_id,
        })
    })
    .await
    .map_err(|e| AppError::Internal(format!("Extraction task failed: {e}")))??;

    Ok(Json(response))
}

/// List stored receipts in insertion order
pub async fn list_receipts(State(state): State<AppState>) -> Result<Json<Vec<Receipt>>, AppError> {
    let receipts = match &state.store {
        Some(store) => store.list()?,
        None => Vec::new(),
    };
    Ok(Json(receipts))
}

/// Fetch one stored receipt
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Receipt>, AppError> {
    let receipt = match &state.store {
        Some(store) => store.get(id)?,
        None => None,
    };
    receipt
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Receipt {id} not found")))
}
