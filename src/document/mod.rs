//! # Receipt Document Model
//!
//! A [`Receipt`] is one validated print job: a [`PrinterConfig`] plus an
//! ordered list of [`PrintElement`]s. It can be built in Rust or parsed from
//! a JSON description, and both paths go through the same invariant checks.
//!
//! ```
//! use posprint::document::{self, Align, Column, PrintElement, Receipt};
//! use posprint::printer::PrinterConfig;
//!
//! // Rust construction
//! let receipt = Receipt::new(
//!     PrinterConfig::new(16)?,
//!     vec![
//!         PrintElement::text("CHURRA MART"),
//!         PrintElement::divider('='),
//!         PrintElement::row(vec![
//!             Column::new("Espresso", 11)?,
//!             Column::new("4.50", 5)?.align(Align::Right),
//!         ]),
//!         PrintElement::PaperCut,
//!     ],
//! )?;
//!
//! // JSON description
//! let parsed = document::parse(r#"{
//!     "config": {"charsPerLine": 16},
//!     "elements": [{"type": "text", "value": "CHURRA MART"}]
//! }"#)?;
//!
//! // Both produce bytes the same way
//! assert!(receipt.to_bytes().starts_with(&[0x1B, 0x40]));
//! assert!(parsed.to_bytes().starts_with(&[0x1B, 0x40]));
//! # Ok::<(), posprint::error::ValidationError>(())
//! ```

pub mod parse;
pub mod types;

pub use parse::{parse, parse_with_fallback};
pub use types::*;

use crate::error::ValidationError;
use crate::ir::{self, PrinterCommand};
use crate::layout::{self, LayoutLine};
use crate::printer::PrinterConfig;

/// A validated print job.
///
/// ## Invariants
///
/// Checked once by [`Receipt::new`] and immutable afterwards:
/// - every row has at least one column
/// - every row's column widths sum to at most `config.chars_per_line()`
/// - every line feed count is in `1..=MAX_LINE_FEED_COUNT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    config: PrinterConfig,
    elements: Vec<PrintElement>,
}

impl Receipt {
    /// Validate `elements` against `config` and build the receipt.
    pub fn new(config: PrinterConfig, elements: Vec<PrintElement>) -> Result<Self, ValidationError> {
        for (i, element) in elements.iter().enumerate() {
            validate_element(&config, i, element)?;
        }
        Ok(Self { config, elements })
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn elements(&self) -> &[PrintElement] {
        &self.elements
    }

    /// Lay the elements out into fixed-width lines.
    pub fn layout(&self) -> Vec<LayoutLine> {
        layout::layout(&self.config, &self.elements)
    }

    /// Lay out and convert to device-neutral printer commands.
    pub fn render(&self) -> Vec<PrinterCommand> {
        ir::render(&self.layout())
    }

    /// Run the full pipeline and generate protocol bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        ir::encode(&self.render())
    }
}

fn validate_element(
    config: &PrinterConfig,
    index: usize,
    element: &PrintElement,
) -> Result<(), ValidationError> {
    match element {
        PrintElement::Row { columns } => {
            if columns.is_empty() {
                return Err(ValidationError::InvalidField {
                    context: format!("elements[{}]", index),
                    field: "columns",
                    message: "a row needs at least one column".into(),
                });
            }
            // Saturate so an absurd sum still reports as too wide.
            let total = columns
                .iter()
                .map(Column::width)
                .try_fold(0usize, usize::checked_add)
                .unwrap_or(usize::MAX);
            if total > config.chars_per_line() {
                return Err(ValidationError::RowTooWide {
                    context: format!("elements[{}]", index),
                    total,
                    chars_per_line: config.chars_per_line(),
                });
            }
        }
        PrintElement::LineFeed { count: 0 } => {
            return Err(ValidationError::NonPositive {
                context: format!("elements[{}]", index),
                field: "count",
                value: 0,
            });
        }
        PrintElement::LineFeed { count } if *count > MAX_LINE_FEED_COUNT => {
            return Err(ValidationError::InvalidField {
                context: format!("elements[{}]", index),
                field: "count",
                message: format!("{} exceeds the maximum of {}", count, MAX_LINE_FEED_COUNT),
            });
        }
        PrintElement::Text { .. }
        | PrintElement::LineFeed { .. }
        | PrintElement::Divider { .. }
        | PrintElement::PaperCut => {}
    }
    Ok(())
}
