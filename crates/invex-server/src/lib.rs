//! # invex-server
//!
//! HTTP service exposing invoice field extraction over multipart uploads.

mod api;
pub use api::{
    AppError, AppState, BANNER, ErrorResponse, ExtractResponse, app, extract_invoice,
    get_receipt, health_check, index, list_receipts,
};
