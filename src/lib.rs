//! # posprint - Receipt Formatting for ESC/POS Thermal Printers
//!
//! posprint turns a declarative receipt description (text, column rows,
//! dividers, line feeds, paper cuts) into the ESC/POS byte stream a thermal
//! receipt printer understands. It provides:
//!
//! - **Parsing**: JSON descriptions validated into a [`Receipt`]
//! - **Layout**: fixed-width lines with word wrap and column padding
//! - **Encoding**: styling and control codes for the printer
//! - **Transport**: TCP (port 9100), serial/RFCOMM and in-memory backends
//!
//! ## Quick Start
//!
//! ```
//! let bytes = posprint::encode_description(r#"{
//!     "config": {"charsPerLine": 32},
//!     "elements": [
//!         {"type": "text", "value": "Hello", "bold": true},
//!         {"type": "cut"}
//!     ]
//! }"#)?;
//!
//! assert_eq!(
//!     bytes,
//!     [
//!         0x1B, 0x40, // init
//!         0x1B, 0x61, 0x00, // align left
//!         0x1B, 0x45, 0x01, // bold on
//!         b'H', b'e', b'l', b'l', b'o',
//!         0x1B, 0x45, 0x00, // bold off
//!         0x0A, // line feed
//!         0x1D, 0x56, 0x00, // full cut
//!     ]
//! );
//! # Ok::<(), posprint::error::ValidationError>(())
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! description ──► parse ──► Receipt ──► layout ──► render ──► encode ──► bytes
//!                  │                     │           │           │
//!            ValidationError       LayoutLine   PrinterCommand  ControlCode
//! ```
//!
//! Only parsing can fail. Every later stage is a pure function of its
//! input, so the same description always yields the same bytes.
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`document`] | Receipt model and JSON parser |
//! | [`layout`] | Line layout, wrapping and padding |
//! | [`ir`] | Printer commands and byte encoding |
//! | [`protocol`] | ESC/POS control code table |
//! | [`printer`] | Line geometry and paper presets |
//! | [`transport`] | Communication backends |
//! | [`server`] | HTTP bridge |
//! | [`error`] | Error types |

pub mod document;
pub mod error;
pub mod ir;
pub mod layout;
pub mod printer;
pub mod protocol;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use document::{PrintElement, Receipt};
pub use error::{PosPrintError, ValidationError};
pub use printer::PrinterConfig;
pub use transport::Transport;

/// Parse a description and run the whole pipeline.
///
/// The description must carry `config.charsPerLine`.
pub fn encode_description(description: &str) -> Result<Vec<u8>, ValidationError> {
    Ok(document::parse(description)?.to_bytes())
}

/// Like [`encode_description`], but fills a missing `config` from `fallback`.
pub fn encode_description_with(
    description: &str,
    fallback: PrinterConfig,
) -> Result<Vec<u8>, ValidationError> {
    Ok(document::parse_with_fallback(description, Some(fallback))?.to_bytes())
}

/// Encode `receipt` and deliver it through `transport`.
///
/// Returns the number of bytes written.
pub fn print<T: Transport + ?Sized>(
    receipt: &Receipt,
    transport: &mut T,
) -> Result<usize, PosPrintError> {
    let bytes = receipt.to_bytes();
    transport::send(transport, &bytes)?;
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;

    #[test]
    fn test_encode_description_requires_config() {
        let err = encode_description(r#"{"elements": []}"#).unwrap_err();
        assert_eq!(err.kind(), "missing_field");
    }

    #[test]
    fn test_encode_description_with_fallback() {
        let bytes =
            encode_description_with(r#"{"elements": [{"type": "divider"}]}"#, PrinterConfig::new(4).unwrap())
                .unwrap();
        assert_eq!(bytes, b"\x1b@\x1ba\x00----\n");
    }

    #[test]
    fn test_print_writes_encoded_bytes() {
        let receipt = document::parse(
            r#"{"config": {"charsPerLine": 8}, "elements": [{"type": "cut"}]}"#,
        )
        .unwrap();
        let mut printer = MemoryTransport::new();

        let n = print(&receipt, &mut printer).unwrap();

        assert_eq!(n, 5);
        assert_eq!(printer.written(), &[0x1B, 0x40, 0x1D, 0x56, 0x00]);
        assert!(!printer.is_connected());
    }

    #[test]
    fn test_print_reports_transport_error() {
        let receipt = Receipt::new(PrinterConfig::default(), vec![PrintElement::PaperCut]).unwrap();
        let mut printer = MemoryTransport::unreachable();

        let err = print(&receipt, &mut printer).unwrap_err();
        assert!(matches!(err, PosPrintError::Transport(_)));
    }
}
