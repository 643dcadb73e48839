//! # Layout Engine
//!
//! Converts a receipt's elements into an ordered list of [`LayoutLine`]s.
//!
//! ## Per-Element Behavior
//!
//! | Element | Lines | Kind |
//! |---------|-------|------|
//! | `Text` | 1, verbatim (no wrap, no padding) | `Text` |
//! | `Row` | max wrapped lines over its columns | `Text` |
//! | `LineFeed { count }` | `count`, empty | `LineFeed` |
//! | `Divider { char }` | 1, `char` × chars per line | `Divider` |
//! | `PaperCut` | 1, empty | `PaperCut` |
//!
//! ## Row Merge
//!
//! ```text
//! columns:  [ Espresso doppio | 4.50 ]   widths 10 + 6
//!
//! wrapped:    "Espresso"        "4.50"
//!             "doppio"
//!
//! lines:     |Espresso    4.50|
//!            |doppio          |
//! ```
//!
//! Each column wraps on its own. Line `i` of the row takes line `i` of every
//! column (empty once a column runs out), pads each cell to its width, and
//! joins the cells with no separator.

pub mod text;

use serde::Serialize;
use tracing::debug;

use crate::document::{Align, Column, PrintElement, TextStyle};
use crate::printer::PrinterConfig;

/// What a layout line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Text,
    LineFeed,
    Divider,
    PaperCut,
}

/// One laid-out line.
///
/// `text` is exactly as wide as the row's total column width when the line
/// came from a row. Lines from bare text and dividers carry their content
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutLine {
    pub text: String,
    pub style: TextStyle,
    pub align: Align,
    pub kind: LineKind,
}

impl LayoutLine {
    fn text(text: String, style: TextStyle, align: Align) -> Self {
        Self {
            text,
            style,
            align,
            kind: LineKind::Text,
        }
    }

    fn marker(kind: LineKind) -> Self {
        Self {
            text: String::new(),
            style: TextStyle::PLAIN,
            align: Align::Left,
            kind,
        }
    }
}

/// Lay out `elements` in order against `config`.
pub fn layout(config: &PrinterConfig, elements: &[PrintElement]) -> Vec<LayoutLine> {
    let mut lines = Vec::new();

    for element in elements {
        match element {
            PrintElement::Text { value, align, style } => {
                lines.push(LayoutLine::text(value.clone(), *style, *align));
            }
            PrintElement::Row { columns } => {
                layout_row(columns, &mut lines);
            }
            PrintElement::LineFeed { count } => {
                lines.extend(std::iter::repeat_n(
                    LayoutLine::marker(LineKind::LineFeed),
                    *count,
                ));
            }
            PrintElement::Divider { char } => {
                lines.push(LayoutLine {
                    text: std::iter::repeat_n(*char, config.chars_per_line()).collect(),
                    style: TextStyle::PLAIN,
                    align: Align::Left,
                    kind: LineKind::Divider,
                });
            }
            PrintElement::PaperCut => {
                lines.push(LayoutLine::marker(LineKind::PaperCut));
            }
        }
    }

    debug!(elements = elements.len(), lines = lines.len(), "laid out receipt");
    lines
}

/// Wrap, merge and style one row.
fn layout_row(columns: &[Column], lines: &mut Vec<LayoutLine>) {
    let wrapped: Vec<Vec<String>> = columns
        .iter()
        .map(|col| text::wrap(col.text(), col.width()))
        .collect();
    let height = wrapped.iter().map(Vec::len).max().unwrap_or(0);
    let style = row_style(columns);

    for i in 0..height {
        let mut line = String::new();
        for (col, col_lines) in columns.iter().zip(&wrapped) {
            let cell = col_lines.get(i).map(String::as_str).unwrap_or("");
            line.push_str(&text::pad(cell, col.width(), col.alignment()));
        }
        lines.push(LayoutLine::text(line, style, Align::Left));
    }
}

/// Style of the first column that has any attribute set.
///
/// The style is row-wide: cells cannot differ within one printed line.
fn row_style(columns: &[Column]) -> TextStyle {
    columns
        .iter()
        .map(Column::text_style)
        .find(TextStyle::is_styled)
        .unwrap_or_default()
}

// ============================================================================
// TESTS
// ============================================================================
