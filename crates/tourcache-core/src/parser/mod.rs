//! CSV parsing for published sheet exports.
//!
//! The first non-empty line is the header row; every later line becomes a
//! `TourRecord` keyed by those headers. Rows that are too short are skipped
//! and reported as `RowDiagnostic`s, rows without a name are dropped
//! silently, and only a document with no data rows at all is an error.

pub mod split;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{
    DEFAULT_COUNTRY_PREFIX, DEFAULT_INQUIRY_MESSAGE, DEFAULT_NAME_FIELD, DEFAULT_PHONE_FIELD,
};
use crate::models::{TourRecord, WHATSAPP_LINK_FIELD};
use crate::utils::whatsapp_link;

pub use split::{clean_cell, split_line};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("CSV data is too short - needs headers and at least one data row (found {found} non-empty lines)")]
    TooFewLines { found: usize },
}

/// A data row that was skipped because it had fewer fields than the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDiagnostic {
    pub row: usize,
    pub field_count: usize,
    pub expected: usize,
}

impl std::fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row {} has {} fields, expected {}",
            self.row, self.field_count, self.expected
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSheet {
    pub records: Vec<TourRecord>,
    pub diagnostics: Vec<RowDiagnostic>,
}

#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Rows without a value in this column are dropped
    pub name_field: String,
    /// Column used to derive the WhatsApp contact link
    pub phone_field: String,
    pub country_prefix: String,
    pub inquiry_message: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            name_field: DEFAULT_NAME_FIELD.to_string(),
            phone_field: DEFAULT_PHONE_FIELD.to_string(),
            country_prefix: DEFAULT_COUNTRY_PREFIX.to_string(),
            inquiry_message: DEFAULT_INQUIRY_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    options: ParserOptions,
}

impl CsvParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn parse(&self, raw: &str) -> Result<ParsedSheet, ParseError> {
        let lines: Vec<&str> = raw
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.len() < 2 {
            return Err(ParseError::TooFewLines { found: lines.len() });
        }

        let headers: Vec<String> = split_line(lines[0])
            .iter()
            .map(|h| clean_cell(h))
            .filter(|h| !h.is_empty())
            .collect();
        debug!(headers = ?headers, "Sheet headers found");

        let parsed_at = Utc::now();
        let mut sheet = ParsedSheet::default();

        for (row, line) in lines.iter().enumerate().skip(1) {
            let values = split_line(line);

            if values.len() < headers.len() {
                let diagnostic = RowDiagnostic {
                    row,
                    field_count: values.len(),
                    expected: headers.len(),
                };
                warn!(row = row, fields = values.len(), expected = headers.len(), "Skipping short row");
                sheet.diagnostics.push(diagnostic);
                continue;
            }

            let mut record = TourRecord::new(row, parsed_at);
            for (index, header) in headers.iter().enumerate() {
                let value = values.get(index).map(|v| clean_cell(v)).unwrap_or_default();
                record.set(header.as_str(), value);
            }

            let name = match record.get(&self.options.name_field) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => continue,
            };

            if let Some(phone) = record.get(&self.options.phone_field).filter(|p| !p.is_empty()) {
                let link = whatsapp_link(
                    phone,
                    &self.options.country_prefix,
                    &name,
                    &self.options.inquiry_message,
                );
                record.set(WHATSAPP_LINK_FIELD, link);
            }

            sheet.records.push(record);
        }

        Ok(sheet)
    }
}

/// Parse with default options
pub fn parse(raw: &str) -> Result<ParsedSheet, ParseError> {
    CsvParser::default().parse(raw)
}
