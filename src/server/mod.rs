//! # HTTP Bridge for Receipt Printing
//!
//! Exposes the pipeline over HTTP so point-of-sale frontends can encode,
//! preview and print receipt descriptions without linking the library.
//!
//! ## Usage
//!
//! ```bash
//! posprint serve --listen 0.0.0.0:8080 --host 192.168.1.50
//! ```
//!
//! ## Routes
//!
//! | Route | Response |
//! |-------|----------|
//! | `POST /api/receipt/encode` | `application/octet-stream` protocol bytes |
//! | `POST /api/receipt/preview` | `{"lines": [{kind, text, align, bold, underline}]}` |
//! | `POST /api/receipt/print` | `{"success": true, "bytes": N}` |
//!
//! A rejected description answers 400 with
//! `{"success": false, "kind": "...", "error": "..."}`; nothing is printed.

mod handlers;
mod state;

pub use handlers::receipt::PreviewLine;
pub use state::{AppState, PrinterTarget, ServerConfig};

use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::PosPrintError;

/// Build the application router.
pub fn router(config: ServerConfig) -> Router {
    let app_state = Arc::new(AppState::new(config));

    Router::new()
        .route("/api/receipt/encode", post(handlers::receipt::encode))
        .route("/api/receipt/preview", post(handlers::receipt::preview))
        .route("/api/receipt/print", post(handlers::receipt::print))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use posprint::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), posprint::error::PosPrintError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     ..ServerConfig::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), PosPrintError> {
    let listen_addr = config.listen_addr.clone();
    let target = config
        .target
        .as_ref()
        .map(|t| t.describe())
        .unwrap_or_else(|| "none (printing disabled)".to_string());
    let chars_per_line = config.default_config.chars_per_line();

    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!(listen = %listen_addr, printer = %target, chars_per_line, "posprint HTTP server starting");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::path::PathBuf;
    use tower::ServiceExt;

    const RECEIPT: &str = r#"{
        "config": {"charsPerLine": 8},
        "elements": [
            {"type": "text", "value": "Hi", "bold": true},
            {"type": "cut"}
        ]
    }"#;

    fn request(path: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_encode_returns_bytes() {
        let app = router(ServerConfig::default());
        let response = app.oneshot(request("/api/receipt/encode", RECEIPT)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        assert_eq!(
            body_bytes(response).await,
            vec![
                0x1B, 0x40, 0x1B, 0x61, 0x00, 0x1B, 0x45, 0x01, b'H', b'i', 0x1B, 0x45, 0x00,
                0x0A, 0x1D, 0x56, 0x00,
            ]
        );
    }

    #[tokio::test]
    async fn test_encode_uses_default_config() {
        let app = router(ServerConfig::default());
        let response = app
            .oneshot(request("/api/receipt/encode", r#"{"elements": [{"type": "divider"}]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = body_bytes(response).await;
        // init + align + 32 dashes + LF
        assert_eq!(bytes.len(), 2 + 3 + 32 + 1);
    }

    #[tokio::test]
    async fn test_preview_lines() {
        let app = router(ServerConfig::default());
        let response = app.oneshot(request("/api/receipt/preview", RECEIPT)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({
                "lines": [
                    {"kind": "text", "text": "Hi", "align": "left", "bold": true, "underline": false},
                    {"kind": "papercut", "text": "", "align": "left", "bold": false, "underline": false}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_validation_error_is_400() {
        let app = router(ServerConfig::default());
        let response = app
            .oneshot(request(
                "/api/receipt/encode",
                r#"{"config": {"charsPerLine": 8}, "elements": [{"type": "barcode"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["kind"], "unknown_element_type");
        assert!(json["error"].as_str().unwrap().contains("barcode"));
    }

    #[tokio::test]
    async fn test_oversized_line_is_400() {
        let app = router(ServerConfig::default());
        let response = app
            .oneshot(request(
                "/api/receipt/encode",
                r#"{"config": {"charsPerLine": 4611686018427387904}, "elements": [{"type": "divider"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["kind"], "invalid_field");
    }

    #[tokio::test]
    async fn test_print_without_target_is_503() {
        let app = router(ServerConfig::default());
        let response = app.oneshot(request("/api/receipt/print", RECEIPT)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_print_writes_to_device() {
        let path: PathBuf =
            std::env::temp_dir().join(format!("posprint-server-{}.bin", std::process::id()));
        std::fs::write(&path, b"").unwrap();

        let app = router(ServerConfig {
            target: Some(PrinterTarget::Serial {
                device: path.clone(),
            }),
            ..ServerConfig::default()
        });
        let response = app.oneshot(request("/api/receipt/print", RECEIPT)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"success": true, "bytes": 17}));
        assert_eq!(std::fs::read(&path).unwrap().len(), 17);
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_print_rejects_invalid_before_sending() {
        let path: PathBuf =
            std::env::temp_dir().join(format!("posprint-server-invalid-{}.bin", std::process::id()));
        std::fs::write(&path, b"").unwrap();

        let app = router(ServerConfig {
            target: Some(PrinterTarget::Serial {
                device: path.clone(),
            }),
            ..ServerConfig::default()
        });
        let response = app
            .oneshot(request("/api/receipt/print", "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(std::fs::read(&path).unwrap().is_empty());
        std::fs::remove_file(&path).unwrap();
    }
}
