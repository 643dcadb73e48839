//! # Renderer
//!
//! Maps layout lines to printer commands, one line at a time:
//!
//! | Line kind | Commands |
//! |-----------|----------|
//! | `Text`, `Divider` | `Text` then `LineFeed` |
//! | `LineFeed` | `LineFeed` |
//! | `PaperCut` | `PaperCut` |

use tracing::debug;

use super::ops::PrinterCommand;
use crate::layout::{LayoutLine, LineKind};

/// Convert layout lines into printer commands, preserving order.
pub fn render(lines: &[LayoutLine]) -> Vec<PrinterCommand> {
    let mut commands = Vec::with_capacity(lines.len() * 2);

    for line in lines {
        match line.kind {
            LineKind::Text | LineKind::Divider => {
                commands.push(PrinterCommand::Text {
                    content: line.text.clone(),
                    bold: line.style.bold,
                    underline: line.style.underline,
                    align: line.align,
                });
                commands.push(PrinterCommand::LineFeed);
            }
            LineKind::LineFeed => commands.push(PrinterCommand::LineFeed),
            LineKind::PaperCut => commands.push(PrinterCommand::PaperCut),
        }
    }

    debug!(lines = lines.len(), commands = commands.len(), "rendered layout");
    commands
}
