//! # Code Generation
//!
//! Converts printer commands to ESC/POS bytes.
//!
//! Output is always `INIT` followed by each command's bytes. Text styling
//! is scoped to the text it applies to:
//!
//! ```text
//! ALIGN(n) [BOLD_ON] [UNDERLINE_ON] <utf-8 text> [BOLD_OFF] [UNDERLINE_OFF]
//! ```
//!
//! so no style is ever left switched on between commands. Encoding is a pure
//! function of its input; the same commands give the same bytes.

use tracing::debug;

use super::ops::PrinterCommand;
use crate::protocol::ControlCode;

/// Encode commands into the protocol byte stream.
pub fn encode(commands: &[PrinterCommand]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(ControlCode::Init.bytes());

    for command in commands {
        match command {
            PrinterCommand::Text {
                content,
                bold,
                underline,
                align,
            } => {
                out.extend_from_slice(ControlCode::Align(*align).bytes());
                if *bold {
                    out.extend_from_slice(ControlCode::BoldOn.bytes());
                }
                if *underline {
                    out.extend_from_slice(ControlCode::UnderlineOn.bytes());
                }
                out.extend_from_slice(content.as_bytes());
                if *bold {
                    out.extend_from_slice(ControlCode::BoldOff.bytes());
                }
                if *underline {
                    out.extend_from_slice(ControlCode::UnderlineOff.bytes());
                }
            }
            PrinterCommand::LineFeed => {
                out.extend_from_slice(ControlCode::LineFeed.bytes());
            }
            PrinterCommand::PaperCut => {
                out.extend_from_slice(ControlCode::FullCut.bytes());
            }
        }
    }

    debug!(commands = commands.len(), bytes = out.len(), "encoded commands");
    out
}
