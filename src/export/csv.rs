//! The shared CSV rendering primitive.
//!
//! All three export dialects render through this module, so the escaping
//! rule exists in exactly one place: any field containing a comma, double
//! quote, or newline is wrapped in double quotes with internal quotes
//! doubled.

use rust_decimal::{Decimal, RoundingStrategy};

/// The UTF-8 byte-order mark prefixed to spreadsheet-bound output.
pub const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// The MIME type of every export produced by this engine.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A rendered export ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// The date-stamped filename the download should use.
    pub filename: String,
    /// The MIME type ([`CSV_CONTENT_TYPE`]).
    pub content_type: &'static str,
    /// The file contents, BOM-prefixed UTF-8.
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Wraps a rendered CSV body into a BOM-prefixed file.
    pub fn csv(filename: impl Into<String>, body: String) -> Self {
        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
        bytes.extend_from_slice(UTF8_BOM);
        bytes.extend_from_slice(body.as_bytes());
        Self {
            filename: filename.into(),
            content_type: CSV_CONTENT_TYPE,
            bytes,
        }
    }

    /// Returns the file contents as text with the BOM stripped.
    pub fn body_text(&self) -> &str {
        let bytes = self
            .bytes
            .strip_prefix(UTF8_BOM)
            .unwrap_or(&self.bytes);
        // The body was built from a String, so it is always valid UTF-8
        std::str::from_utf8(bytes).expect("export body is valid UTF-8")
    }
}

/// Escapes one CSV field.
///
/// Fields containing a comma, double quote, or newline are wrapped in
/// double quotes with internal quotes doubled; anything else passes
/// through unchanged.
///
/// # Example
///
/// ```
/// use ndis_billing_engine::export::escape_field;
///
/// assert_eq!(escape_field("plain"), "plain");
/// assert_eq!(escape_field("a,b"), "\"a,b\"");
/// assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
/// ```
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Appends one escaped row to a CSV body, CRLF-terminated.
pub fn write_row(body: &mut String, fields: &[String]) {
    let mut first = true;
    for field in fields {
        if !first {
            body.push(',');
        }
        body.push_str(&escape_field(field));
        first = false;
    }
    body.push_str("\r\n");
}

/// Formats a currency amount as a plain 2-decimal string ("275.00").
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Formats an hours quantity as a plain 2-decimal string ("2.75").
pub fn format_quantity(quantity: Decimal) -> String {
    format_amount(quantity)
}
