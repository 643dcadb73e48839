//! Element types for the receipt model.
//!
//! [`PrintElement`] is a closed set. Adding a variant means one new case
//! here and one handler in each consuming stage (layout, then whatever the
//! new variant lowers to); existing cases are never touched.

use serde::Serialize;

use crate::error::ValidationError;
use crate::printer::MAX_CHARS_PER_LINE;

/// Most blank lines one `LineFeed` may ask for (one ESC/POS `ESC d n` worth).
pub const MAX_LINE_FEED_COUNT: usize = 255;

/// Horizontal placement of text within its line or cell.
///
/// The discriminants double as the protocol's alignment selector index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Align {
    /// Parse the wire token (`"left"`, `"center"`, `"right"`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "left" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" => Some(Align::Right),
            _ => None,
        }
    }

    /// Index into the alignment entries of the control table.
    #[inline]
    pub fn selector(self) -> usize {
        self as usize
    }
}

/// Character styling carried from an element down to the encoder.
///
/// New attributes (italics, font) get added as fields defaulting to off,
/// so existing values keep their meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TextStyle {
    pub bold: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const PLAIN: Self = Self {
        bold: false,
        underline: false,
    };

    /// True when any attribute is switched on.
    #[inline]
    pub fn is_styled(&self) -> bool {
        self.bold || self.underline
    }
}

/// One fixed-width cell of a [`PrintElement::Row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    text: String,
    width: usize,
    align: Align,
    style: TextStyle,
}

impl Column {
    /// Create a left-aligned, unstyled column.
    ///
    /// Fails with [`ValidationError::NonPositive`] when `width` is zero, and
    /// with [`ValidationError::InvalidField`] when it is wider than any line
    /// can be ([`MAX_CHARS_PER_LINE`]).
    pub fn new(text: impl Into<String>, width: usize) -> Result<Self, ValidationError> {
        if width == 0 {
            return Err(ValidationError::NonPositive {
                context: "column".into(),
                field: "width",
                value: 0,
            });
        }
        if width > MAX_CHARS_PER_LINE {
            return Err(ValidationError::InvalidField {
                context: "column".into(),
                field: "width",
                message: format!("{} exceeds the maximum of {}", width, MAX_CHARS_PER_LINE),
            });
        }
        Ok(Self {
            text: text.into(),
            width,
            align: Align::Left,
            style: TextStyle::PLAIN,
        })
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.style.underline = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn alignment(&self) -> Align {
        self.align
    }

    pub fn text_style(&self) -> TextStyle {
        self.style
    }
}

/// One element of a receipt, in print order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintElement {
    /// A single line of text, printed as given (never wrapped).
    Text {
        value: String,
        align: Align,
        style: TextStyle,
    },
    /// A table line built from fixed-width columns.
    Row { columns: Vec<Column> },
    /// `count` blank lines, `1..=MAX_LINE_FEED_COUNT`.
    LineFeed { count: usize },
    /// A full-width rule drawn with `char`.
    Divider { char: char },
    /// Cut the paper.
    PaperCut,
}

impl PrintElement {
    /// Left-aligned, unstyled text.
    pub fn text(value: impl Into<String>) -> Self {
        PrintElement::Text {
            value: value.into(),
            align: Align::Left,
            style: TextStyle::PLAIN,
        }
    }

    pub fn row(columns: Vec<Column>) -> Self {
        PrintElement::Row { columns }
    }

    pub fn line_feed(count: usize) -> Self {
        PrintElement::LineFeed { count }
    }

    pub fn divider(char: char) -> Self {
        PrintElement::Divider { char }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_tokens() {
        assert_eq!(Align::from_token("left"), Some(Align::Left));
        assert_eq!(Align::from_token("center"), Some(Align::Center));
        assert_eq!(Align::from_token("right"), Some(Align::Right));
        assert_eq!(Align::from_token("Left"), None);
        assert_eq!(Align::from_token("justify"), None);
    }

    #[test]
    fn test_align_selector() {
        assert_eq!(Align::Left.selector(), 0);
        assert_eq!(Align::Center.selector(), 1);
        assert_eq!(Align::Right.selector(), 2);
    }

    #[test]
    fn test_column_rejects_zero_width() {
        let err = Column::new("x", 0).unwrap_err();
        assert_eq!(err.kind(), "non_positive");
    }

    #[test]
    fn test_column_builder() {
        let col = Column::new("Total", 10).unwrap().align(Align::Right).bold();
        assert_eq!(col.text(), "Total");
        assert_eq!(col.width(), 10);
        assert_eq!(col.alignment(), Align::Right);
        assert!(col.text_style().bold);
        assert!(!col.text_style().underline);
    }

    #[test]
    fn test_style_is_styled() {
        assert!(!TextStyle::PLAIN.is_styled());
        assert!(TextStyle { bold: true, underline: false }.is_styled());
        assert!(TextStyle { bold: false, underline: true }.is_styled());
    }

    #[test]
    fn test_column_width_upper_bound() {
        assert_eq!(Column::new("x", MAX_CHARS_PER_LINE).unwrap().width(), MAX_CHARS_PER_LINE);
        let err = Column::new("x", MAX_CHARS_PER_LINE + 1).unwrap_err();
        assert_eq!(err.kind(), "invalid_field");
        assert_eq!(Column::new("x", usize::MAX).unwrap_err().kind(), "invalid_field");
    }
}
