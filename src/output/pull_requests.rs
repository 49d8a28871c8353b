//! Pull-request CSV layout

use crate::github::PullRequestRecord;
use crate::output::csv::CsvDocument;
use crate::output::files::{read_file, write_file};
use crate::E2eError;
use std::path::Path;

/// Columns of the open pull-request export
pub const PR_HEADER: [&str; 4] = ["PR Name", "Created Date", "Author", "URL"];

/// Columns of the all-states export
pub const PR_HEADER_WITH_STATE: [&str; 5] = ["PR Name", "Created Date", "Author", "URL", "State"];

/// Projects records onto the export columns
pub fn pull_request_document(
    records: &[PullRequestRecord],
    include_state: bool,
) -> Result<CsvDocument, E2eError> {
    let rows = records
        .iter()
        .map(|pr| {
            let mut row = vec![
                pr.title.clone(),
                pr.created_at.clone(),
                pr.author_login.clone(),
                pr.html_url.clone(),
            ];
            if include_state {
                row.push(pr.state.as_str().to_string());
            }
            row
        })
        .collect();

    if include_state {
        CsvDocument::new(&PR_HEADER_WITH_STATE, rows)
    } else {
        CsvDocument::new(&PR_HEADER, rows)
    }
}

/// Writes records as CSV to `path` and returns the written document
pub fn export_pull_requests(
    path: &Path,
    records: &[PullRequestRecord],
    include_state: bool,
) -> Result<CsvDocument, E2eError> {
    let document = pull_request_document(records, include_state)?;
    write_file(path, &document.to_csv()?)?;
    tracing::info!("CSV file created at: {}", path.display());
    Ok(document)
}

/// Reads `path` back and checks it against the document that was written
///
/// The header must match field for field and the number of data rows must be
/// unchanged. Returns the parsed document.
pub fn verify_round_trip(path: &Path, expected: &CsvDocument) -> Result<CsvDocument, E2eError> {
    let parsed = CsvDocument::parse(&read_file(path)?)?;

    if parsed.header() != expected.header() {
        return Err(E2eError::Assertion(format!(
            "{}: header {:?} does not match {:?}",
            path.display(),
            parsed.header(),
            expected.header()
        )));
    }

    if parsed.rows().len() != expected.rows().len() {
        return Err(E2eError::Assertion(format!(
            "{}: expected {} data rows, found {}",
            path.display(),
            expected.rows().len(),
            parsed.rows().len()
        )));
    }

    Ok(parsed)
}
