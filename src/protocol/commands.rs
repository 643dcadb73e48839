//! # ESC/POS Control Sequences
//!
//! Every control byte the encoder emits lives in one table, keyed by
//! [`ControlCode`]. Nothing else in the crate spells out protocol bytes.
//!
//! ## Command Table
//!
//! | Command | Hex | ASCII |
//! |---------|-----|-------|
//! | Initialize | `1B 40` | ESC @ |
//! | Bold on / off | `1B 45 01` / `1B 45 00` | ESC E n |
//! | Underline on / off | `1B 2D 01` / `1B 2D 00` | ESC - n |
//! | Align left / center / right | `1B 61 00` / `1B 61 01` / `1B 61 02` | ESC a n |
//! | Line feed | `0A` | LF |
//! | Full cut | `1D 56 00` | GS V 0 |
//! | Partial cut | `1D 56 01` | GS V 1 |
//!
//! ## Escape Sequence Structure
//!
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Three bytes with a parameter: `ESC E n`, `ESC - n`, `ESC a n`, `GS V n`
//!
//! The parameter bytes here are fixed per entry, so each sequence is a
//! constant slice.

use crate::document::Align;

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix (cutter, graphics)
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// LOOKUP TABLE
// ============================================================================

/// A fixed control sequence of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCode {
    /// Reset the printer to its power-on state. Always first in a job.
    Init,
    BoldOn,
    BoldOff,
    UnderlineOn,
    UnderlineOff,
    /// Alignment for the next printed line.
    Align(Align),
    LineFeed,
    /// Cut straight through the paper.
    FullCut,
    /// Cut leaving a small hinge. Defined for completeness; the encoder
    /// always issues [`ControlCode::FullCut`].
    PartialCut,
}

/// Alignment entries, indexed by [`Align::selector`].
static ALIGN: [[u8; 3]; 3] = [
    [ESC, b'a', 0x00],
    [ESC, b'a', 0x01],
    [ESC, b'a', 0x02],
];

impl ControlCode {
    /// The exact bytes of this control sequence.
    pub fn bytes(self) -> &'static [u8] {
        match self {
            ControlCode::Init => &[ESC, b'@'],
            ControlCode::BoldOn => &[ESC, b'E', 0x01],
            ControlCode::BoldOff => &[ESC, b'E', 0x00],
            ControlCode::UnderlineOn => &[ESC, b'-', 0x01],
            ControlCode::UnderlineOff => &[ESC, b'-', 0x00],
            ControlCode::Align(align) => &ALIGN[align.selector()],
            ControlCode::LineFeed => &[LF],
            ControlCode::FullCut => &[GS, b'V', 0x00],
            ControlCode::PartialCut => &[GS, b'V', 0x01],
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(ControlCode::Init.bytes(), &[0x1B, 0x40]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(ControlCode::BoldOn.bytes(), &[0x1B, 0x45, 0x01]);
        assert_eq!(ControlCode::BoldOff.bytes(), &[0x1B, 0x45, 0x00]);
    }

    #[test]
    fn test_underline() {
        assert_eq!(ControlCode::UnderlineOn.bytes(), &[0x1B, 0x2D, 0x01]);
        assert_eq!(ControlCode::UnderlineOff.bytes(), &[0x1B, 0x2D, 0x00]);
    }

    #[test]
    fn test_align() {
        assert_eq!(ControlCode::Align(Align::Left).bytes(), &[0x1B, 0x61, 0x00]);
        assert_eq!(ControlCode::Align(Align::Center).bytes(), &[0x1B, 0x61, 0x01]);
        assert_eq!(ControlCode::Align(Align::Right).bytes(), &[0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_align_table_matches_selector() {
        for align in [Align::Left, Align::Center, Align::Right] {
            assert_eq!(ALIGN[align.selector()][2] as usize, align.selector());
        }
    }

    #[test]
    fn test_line_feed() {
        assert_eq!(ControlCode::LineFeed.bytes(), &[0x0A]);
    }

    #[test]
    fn test_cuts() {
        assert_eq!(ControlCode::FullCut.bytes(), &[0x1D, 0x56, 0x00]);
        assert_eq!(ControlCode::PartialCut.bytes(), &[0x1D, 0x56, 0x01]);
    }
}
