//! JSON description parser.
//!
//! Turns a structured-text description into a validated [`Receipt`]:
//!
//! ```json
//! {
//!   "config": { "charsPerLine": 32 },
//!   "elements": [
//!     { "type": "text", "value": "HELLO", "align": "center", "bold": true },
//!     { "type": "divider", "char": "=" },
//!     { "type": "row", "columns": [
//!         { "text": "Espresso", "width": 24 },
//!         { "text": "4.50", "width": 8, "align": "right" }
//!     ] },
//!     { "type": "linefeed", "count": 2 },
//!     { "type": "cut" }
//!   ]
//! }
//! ```
//!
//! Parsing is all-or-nothing: the first problem found is returned as a
//! [`ValidationError`] and no receipt is produced. Unknown element types are
//! rejected, never skipped.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use super::types::{Align, Column, MAX_LINE_FEED_COUNT, PrintElement, TextStyle};
use super::Receipt;
use crate::error::ValidationError;
use crate::printer::{MAX_CHARS_PER_LINE, PrinterConfig};

// ============================================================================
// SCHEMA
// ============================================================================

/// Top-level description. Required fields are `Option` so their absence is
/// reported as [`ValidationError::MissingField`] rather than a serde message.
#[derive(Debug, Deserialize)]
struct JsonDescription {
    #[serde(default)]
    config: Option<JsonConfig>,
    #[serde(default)]
    elements: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct JsonConfig {
    #[serde(default, rename = "charsPerLine", alias = "chars_per_line")]
    chars_per_line: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct JsonText {
    #[serde(default)]
    value: Option<String>,
    /// "left" (default), "center", "right".
    #[serde(default)]
    align: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    underline: bool,
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    #[serde(default)]
    columns: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct JsonColumn {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    width: Option<i64>,
    #[serde(default)]
    align: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    underline: bool,
}

#[derive(Debug, Deserialize)]
struct JsonLineFeed {
    #[serde(default)]
    count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct JsonDivider {
    #[serde(default)]
    char: Option<String>,
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Parse a description that carries its own `config.charsPerLine`.
pub fn parse(description: &str) -> Result<Receipt, ValidationError> {
    parse_with_fallback(description, None)
}

/// Parse a description, using `fallback` when `config` or
/// `config.charsPerLine` is absent.
///
/// An explicit but invalid `charsPerLine` is still an error; the fallback
/// only fills gaps.
pub fn parse_with_fallback(
    description: &str,
    fallback: Option<PrinterConfig>,
) -> Result<Receipt, ValidationError> {
    let value: Value = serde_json::from_str(description)
        .map_err(|e| ValidationError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(ValidationError::Malformed(format!(
            "expected a JSON object at the top level, got {}",
            json_type(&value)
        )));
    }

    let doc: JsonDescription = from_value(value, "description")?;

    let config = resolve_config(doc.config, fallback)?;
    let raw_elements = doc.elements.ok_or_else(|| ValidationError::MissingField {
        context: "description".into(),
        field: "elements",
    })?;

    let elements = raw_elements
        .into_iter()
        .enumerate()
        .map(|(i, v)| parse_element(i, v))
        .collect::<Result<Vec<_>, _>>()?;

    let receipt = Receipt::new(config, elements)?;
    debug!(
        elements = receipt.elements().len(),
        chars_per_line = config.chars_per_line(),
        "parsed receipt description"
    );
    Ok(receipt)
}

// ============================================================================
// CONVERSION
// ============================================================================

fn resolve_config(
    raw: Option<JsonConfig>,
    fallback: Option<PrinterConfig>,
) -> Result<PrinterConfig, ValidationError> {
    let chars = match (raw, fallback) {
        (Some(JsonConfig { chars_per_line: Some(n) }), _) => n,
        (_, Some(config)) => return Ok(config),
        (Some(_), None) => {
            return Err(ValidationError::MissingField {
                context: "config".into(),
                field: "charsPerLine",
            });
        }
        (None, None) => {
            return Err(ValidationError::MissingField {
                context: "description".into(),
                field: "config",
            });
        }
    };
    let chars = bounded(chars, MAX_CHARS_PER_LINE, "config", "charsPerLine")?;
    PrinterConfig::new(chars)
}

fn parse_element(index: usize, value: Value) -> Result<PrintElement, ValidationError> {
    let context = format!("elements[{}]", index);
    let obj = as_object(value, &context)?;

    let type_name = match obj.get("type") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(ValidationError::Malformed(format!(
                "{}: 'type' must be a string, got {}",
                context,
                json_type(other)
            )));
        }
        None => {
            return Err(ValidationError::MissingField {
                context,
                field: "type",
            });
        }
    };

    let value = Value::Object(obj);
    match type_name.as_str() {
        "text" => {
            let t: JsonText = from_value(value, &context)?;
            t.into_element(&context)
        }
        "row" => {
            let r: JsonRow = from_value(value, &context)?;
            r.into_element(&context)
        }
        "linefeed" => {
            let lf: JsonLineFeed = from_value(value, &context)?;
            let count = bounded(lf.count.unwrap_or(1), MAX_LINE_FEED_COUNT, &context, "count")?;
            Ok(PrintElement::LineFeed { count })
        }
        "divider" => {
            let d: JsonDivider = from_value(value, &context)?;
            d.into_element(&context)
        }
        "cut" => Ok(PrintElement::PaperCut),
        _ => Err(ValidationError::UnknownElementType {
            context,
            type_name,
        }),
    }
}

impl JsonText {
    fn into_element(self, context: &str) -> Result<PrintElement, ValidationError> {
        let value = self.value.ok_or_else(|| ValidationError::MissingField {
            context: context.to_string(),
            field: "value",
        })?;
        Ok(PrintElement::Text {
            value,
            align: parse_align(self.align.as_deref(), context)?,
            style: TextStyle {
                bold: self.bold,
                underline: self.underline,
            },
        })
    }
}

impl JsonRow {
    fn into_element(self, context: &str) -> Result<PrintElement, ValidationError> {
        let raw_columns = self.columns.ok_or_else(|| ValidationError::MissingField {
            context: context.to_string(),
            field: "columns",
        })?;

        let columns = raw_columns
            .into_iter()
            .enumerate()
            .map(|(j, v)| {
                let column_context = format!("{}.columns[{}]", context, j);
                let obj = as_object(v, &column_context)?;
                let column: JsonColumn = from_value(Value::Object(obj), &column_context)?;
                column.into_column(&column_context)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PrintElement::Row { columns })
    }
}

impl JsonColumn {
    fn into_column(self, context: &str) -> Result<Column, ValidationError> {
        let text = self.text.ok_or_else(|| ValidationError::MissingField {
            context: context.to_string(),
            field: "text",
        })?;
        let width = self.width.ok_or_else(|| ValidationError::MissingField {
            context: context.to_string(),
            field: "width",
        })?;
        let width = bounded(width, MAX_CHARS_PER_LINE, context, "width")?;
        let align = parse_align(self.align.as_deref(), context)?;

        Ok(Column::new(text, width)?.align(align).style(TextStyle {
            bold: self.bold,
            underline: self.underline,
        }))
    }
}

impl JsonDivider {
    fn into_element(self, context: &str) -> Result<PrintElement, ValidationError> {
        let Some(raw) = self.char else {
            return Ok(PrintElement::Divider { char: '-' });
        };
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(PrintElement::Divider { char: c }),
            _ => Err(ValidationError::InvalidField {
                context: context.to_string(),
                field: "char",
                message: format!("expected exactly one character, got \"{}\"", raw),
            }),
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn parse_align(token: Option<&str>, context: &str) -> Result<Align, ValidationError> {
    match token {
        None => Ok(Align::Left),
        Some(t) => Align::from_token(t).ok_or_else(|| ValidationError::InvalidAlignment {
            context: context.to_string(),
            value: t.to_string(),
        }),
    }
}

/// Check `0 < value <= max` and convert.
fn bounded(
    value: i64,
    max: usize,
    context: &str,
    field: &'static str,
) -> Result<usize, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositive {
            context: context.to_string(),
            field,
            value,
        });
    }
    match usize::try_from(value) {
        Ok(n) if n <= max => Ok(n),
        _ => Err(ValidationError::InvalidField {
            context: context.to_string(),
            field,
            message: format!("{} exceeds the maximum of {}", value, max),
        }),
    }
}

fn as_object(value: Value, context: &str) -> Result<Map<String, Value>, ValidationError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::Malformed(format!(
            "{}: expected object, got {}",
            context,
            json_type(&other)
        ))),
    }
}

fn from_value<T: DeserializeOwned>(value: Value, context: &str) -> Result<T, ValidationError> {
    serde_json::from_value(value)
        .map_err(|e| ValidationError::Malformed(format!("{}: {}", context, e)))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// TESTS
// ============================================================================
