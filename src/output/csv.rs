//! CSV serialization
//!
//! The header line is written with minimal quoting so that it reads
//! `PR Name,Created Date,Author,URL`. Every data field is quoted, with
//! embedded quotes doubled. Lines are joined by `\n` with no trailing newline.

use crate::E2eError;
use ::csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

/// A header row plus data rows of the same width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvDocument {
    /// Creates a document, rejecting rows whose width differs from the header
    pub fn new<H: AsRef<str>>(header: &[H], rows: Vec<Vec<String>>) -> Result<Self, E2eError> {
        let header: Vec<String> = header.iter().map(|h| h.as_ref().to_string()).collect();

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != header.len())
        {
            return Err(E2eError::CsvShape {
                row: index + 1,
                expected: header.len(),
                found: row.len(),
            });
        }

        Ok(Self { header, rows })
    }

    /// Parses CSV text whose first record is the header
    pub fn parse(text: &str) -> Result<Self, E2eError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());

        let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(String::from).collect());
        }

        Self::new(&header, rows)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of records including the header
    pub fn record_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Serializes the document
    pub fn to_csv(&self) -> Result<String, E2eError> {
        let mut lines = Vec::with_capacity(self.record_count());
        lines.push(encode_line(&self.header, QuoteStyle::Necessary)?);
        for row in &self.rows {
            lines.push(encode_line(row, QuoteStyle::Always)?);
        }
        Ok(lines.join("\n"))
    }
}

/// Serializes a header and rows in one step
///
/// # Example
///
/// ```
/// use fashionhub_e2e::output::to_csv;
///
/// let csv = to_csv(&["Name", "Note"], vec![vec!["a".into(), "say \"hi\", twice".into()]]).unwrap();
/// assert_eq!(csv, "Name,Note\n\"a\",\"say \"\"hi\"\", twice\"");
/// ```
pub fn to_csv<H: AsRef<str>>(header: &[H], rows: Vec<Vec<String>>) -> Result<String, E2eError> {
    CsvDocument::new(header, rows)?.to_csv()
}

fn encode_line(fields: &[String], style: QuoteStyle) -> Result<String, E2eError> {
    let mut writer = WriterBuilder::new()
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(fields)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| E2eError::Io(e.into_error()))?;
    let mut line = String::from_utf8(bytes)
        .map_err(|e| E2eError::InvalidRecord(format!("CSV output is not UTF-8: {}", e)))?;

    // Drop the record terminator; lines are joined by the caller
    line.pop();
    Ok(line)
}
