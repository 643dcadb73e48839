//! # Printer Configuration
//!
//! This module defines the line geometry of the target thermal printer.
//!
//! ## Paper Presets
//!
//! | Preset | Paper | Chars per line (Font A) |
//! |--------|-------|-------------------------|
//! | `PAPER_58MM` | 58mm | 32 |
//! | `PAPER_80MM` | 80mm | 48 |
//!
//! ## Usage
//!
//! ```
//! use posprint::printer::PrinterConfig;
//!
//! let config = PrinterConfig::new(42)?;
//! assert_eq!(config.chars_per_line(), 42);
//!
//! let preset = PrinterConfig::by_name("80mm")?;
//! assert_eq!(preset.chars_per_line(), 48);
//! # Ok::<(), posprint::error::ValidationError>(())
//! ```

use crate::error::ValidationError;

/// Chars per line used when a caller has nothing better to go on.
pub const DEFAULT_CHARS_PER_LINE: usize = 32;

/// Widest line accepted. Real paper tops out well below this; anything
/// larger is a broken description, not a printer.
pub const MAX_CHARS_PER_LINE: usize = 512;

/// # Printer Configuration
///
/// The fixed character width of one printed line. Every row's columns must
/// fit inside it, and dividers are drawn exactly this wide.
///
/// ## Invariant
///
/// `0 < chars_per_line <= MAX_CHARS_PER_LINE`. The field is private so the only ways to get a
/// value are [`PrinterConfig::new`], the presets, and `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrinterConfig {
    chars_per_line: usize,
}

impl PrinterConfig {
    /// # 58mm Paper
    ///
    /// 48mm printable at 203 DPI with the 12-dot Font A: 32 columns.
    pub const PAPER_58MM: Self = Self { chars_per_line: 32 };

    /// # 80mm Paper
    ///
    /// 72mm printable (576 dots) with the 12-dot Font A: 48 columns.
    pub const PAPER_80MM: Self = Self { chars_per_line: 48 };

    /// Create a configuration with the given line width.
    ///
    /// Fails immediately with [`ValidationError::NonPositive`] for zero and
    /// [`ValidationError::InvalidField`] above [`MAX_CHARS_PER_LINE`].
    pub fn new(chars_per_line: usize) -> Result<Self, ValidationError> {
        if chars_per_line == 0 {
            return Err(ValidationError::NonPositive {
                context: "config".into(),
                field: "charsPerLine",
                value: 0,
            });
        }
        if chars_per_line > MAX_CHARS_PER_LINE {
            return Err(ValidationError::InvalidField {
                context: "config".into(),
                field: "charsPerLine",
                message: format!(
                    "{} exceeds the maximum of {}",
                    chars_per_line, MAX_CHARS_PER_LINE
                ),
            });
        }
        Ok(Self { chars_per_line })
    }

    /// Number of character columns on one printed line.
    #[inline]
    pub fn chars_per_line(&self) -> usize {
        self.chars_per_line
    }

    /// Look up a configuration by paper name or explicit width.
    ///
    /// Formats:
    /// - `"58mm"` → [`PrinterConfig::PAPER_58MM`]
    /// - `"80mm"` → [`PrinterConfig::PAPER_80MM`]
    /// - `"cols:N"` → `N` chars per line
    pub fn by_name(name: &str) -> Result<Self, ValidationError> {
        match name.to_lowercase().as_str() {
            "58mm" | "58" => Ok(Self::PAPER_58MM),
            "80mm" | "80" => Ok(Self::PAPER_80MM),
            other if other.starts_with("cols:") => {
                let raw = &other["cols:".len()..];
                let chars: usize = raw.parse().map_err(|_| ValidationError::InvalidField {
                    context: "config".into(),
                    field: "paper",
                    message: format!("invalid column count \"{}\"", raw),
                })?;
                Self::new(chars)
            }
            _ => Err(ValidationError::InvalidField {
                context: "config".into(),
                field: "paper",
                message: format!("unknown paper \"{}\", use 58mm, 80mm or cols:N", name),
            }),
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            chars_per_line: DEFAULT_CHARS_PER_LINE,
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
    fn test_new_rejects_zero() {
        let err = PrinterConfig::new(0).unwrap_err();
        assert_eq!(err.kind(), "non_positive");
    }

    #[test]
    fn test_new_accepts_positive() {
        assert_eq!(PrinterConfig::new(1).unwrap().chars_per_line(), 1);
        assert_eq!(PrinterConfig::new(64).unwrap().chars_per_line(), 64);
    }

    #[test]
    fn test_new_upper_bound() {
        assert_eq!(
            PrinterConfig::new(MAX_CHARS_PER_LINE).unwrap().chars_per_line(),
            MAX_CHARS_PER_LINE
        );
        let err = PrinterConfig::new(MAX_CHARS_PER_LINE + 1).unwrap_err();
        assert_eq!(err.kind(), "invalid_field");
        assert_eq!(
            PrinterConfig::new(usize::MAX).unwrap_err().kind(),
            "invalid_field"
        );
    }

    #[test]
    fn test_presets() {
        assert_eq!(PrinterConfig::PAPER_58MM.chars_per_line(), 32);
        assert_eq!(PrinterConfig::PAPER_80MM.chars_per_line(), 48);
    }

    #[test]
    fn test_default_is_32() {
        assert_eq!(PrinterConfig::default(), PrinterConfig::PAPER_58MM);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(PrinterConfig::by_name("58mm").unwrap(), PrinterConfig::PAPER_58MM);
        assert_eq!(PrinterConfig::by_name("80MM").unwrap(), PrinterConfig::PAPER_80MM);
        assert_eq!(PrinterConfig::by_name("cols:42").unwrap().chars_per_line(), 42);
    }

    #[test]
    fn test_by_name_rejects_garbage() {
        assert!(PrinterConfig::by_name("a4").is_err());
        assert!(PrinterConfig::by_name("cols:x").is_err());
        assert_eq!(
            PrinterConfig::by_name("cols:0").unwrap_err().kind(),
            "non_positive"
        );
    }
}
