//! # Printer Commands
//!
//! The device-neutral vocabulary between layout and encoding:
//!
//! ```text
//! LayoutLines → render → Vec<PrinterCommand> → encode → Bytes
//! ```
//!
//! A command says *what* to print, never *which bytes* do it. A different
//! backend (bitmap, preview) can consume the same commands.

use crate::document::Align;

/// One device-neutral printer instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterCommand {
    /// Print `content` on the current line with the given styling.
    Text {
        content: String,
        bold: bool,
        underline: bool,
        align: Align,
    },

    /// Advance to the next line.
    LineFeed,

    /// Cut the paper.
    PaperCut,
}
