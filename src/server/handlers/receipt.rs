//! Receipt handlers.
//!
//! Every route takes the raw JSON description as the request body. A
//! description without `config` is laid out with the server's default line
//! width.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    document::{self, Align, Receipt},
    error::ValidationError,
    layout::LineKind,
    transport,
};

use super::super::state::AppState;

/// One line of `/preview` output.
#[derive(Debug, Serialize)]
pub struct PreviewLine {
    pub kind: LineKind,
    pub text: String,
    pub align: Align,
    pub bold: bool,
    pub underline: bool,
}

/// Handle POST /api/receipt/encode - return the raw protocol bytes.
pub async fn encode(State(state): State<Arc<AppState>>, body: String) -> Response {
    match parse(&state, &body) {
        Ok(receipt) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            receipt.to_bytes(),
        )
            .into_response(),
        Err(e) => validation_response(&e),
    }
}

/// Handle POST /api/receipt/preview - return the laid-out lines as JSON.
pub async fn preview(State(state): State<Arc<AppState>>, body: String) -> Response {
    let receipt = match parse(&state, &body) {
        Ok(r) => r,
        Err(e) => return validation_response(&e),
    };

    let lines: Vec<PreviewLine> = receipt
        .layout()
        .into_iter()
        .map(|line| PreviewLine {
            kind: line.kind,
            text: line.text,
            align: line.align,
            bold: line.style.bold,
            underline: line.style.underline,
        })
        .collect();

    (StatusCode::OK, Json(json!({ "lines": lines }))).into_response()
}

/// Handle POST /api/receipt/print - encode and send to the configured printer.
pub async fn print(State(state): State<Arc<AppState>>, body: String) -> Response {
    let receipt = match parse(&state, &body) {
        Ok(r) => r,
        Err(e) => return validation_response(&e),
    };

    let Some(target) = state.config.target.clone() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "no_printer",
            "No printer configured",
        );
    };

    let data = receipt.to_bytes();
    let len = data.len();

    // Print to device (blocking operation, run in separate thread)
    let print_result = tokio::task::spawn_blocking(move || {
        let mut printer = target.open();
        transport::send(&mut printer, &data)
    })
    .await;

    match print_result {
        Ok(Ok(())) => {
            info!(bytes = len, "printed receipt");
            (StatusCode::OK, Json(json!({ "success": true, "bytes": len }))).into_response()
        }
        Ok(Err(e)) => {
            warn!(error = %e, "print failed");
            error_response(
                StatusCode::BAD_GATEWAY,
                "transport",
                &format!("Print failed: {}", e),
            )
        }
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            &format!("Task error: {}", e),
        ),
    }
}

fn parse(state: &AppState, body: &str) -> Result<Receipt, ValidationError> {
    document::parse_with_fallback(body, Some(state.config.default_config))
}

fn validation_response(e: &ValidationError) -> Response {
    warn!(kind = e.kind(), error = %e, "rejected description");
    error_response(StatusCode::BAD_REQUEST, e.kind(), &e.to_string())
}

fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "kind": kind, "error": message })),
    )
        .into_response()
}
