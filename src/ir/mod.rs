//! # Command Pipeline
//!
//! The back half of the pipeline: layout lines become device-neutral
//! [`PrinterCommand`]s, which become ESC/POS bytes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────┐     ┌────────────────────┐     ┌──────────┐
//! │ LayoutLines │ ──► │  render  │ ──► │ Vec<PrinterCommand>│ ──► │  encode  │ ──► bytes
//! └─────────────┘     └──────────┘     └────────────────────┘     └──────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use posprint::document::Align;
//! use posprint::ir::{self, PrinterCommand};
//!
//! let commands = vec![
//!     PrinterCommand::Text {
//!         content: "Hello".into(),
//!         bold: false,
//!         underline: false,
//!         align: Align::Left,
//!     },
//!     PrinterCommand::LineFeed,
//! ];
//!
//! let bytes = ir::encode(&commands);
//! assert_eq!(bytes, b"\x1b@\x1ba\x00Hello\n");
//! ```

mod codegen;
mod ops;
mod render;

pub use codegen::encode;
pub use ops::*;
pub use render::render;
