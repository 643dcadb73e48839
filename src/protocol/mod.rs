//! # ESC/POS Protocol
//!
//! Control sequences for ESC/POS-compatible thermal receipt printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: The control-byte lookup table
//!
//! ## Usage Example
//!
//! ```
//! use posprint::document::Align;
//! use posprint::protocol::commands::ControlCode;
//!
//! let mut data = Vec::new();
//! data.extend_from_slice(ControlCode::Init.bytes());
//! data.extend_from_slice(ControlCode::Align(Align::Center).bytes());
//! data.extend_from_slice(ControlCode::BoldOn.bytes());
//! data.extend_from_slice(b"RECEIPT");
//! data.extend_from_slice(ControlCode::BoldOff.bytes());
//! data.extend_from_slice(ControlCode::LineFeed.bytes());
//! data.extend_from_slice(ControlCode::FullCut.bytes());
//!
//! assert_eq!(&data[..2], &[0x1B, 0x40]);
//! ```

pub mod commands;

pub use commands::ControlCode;
