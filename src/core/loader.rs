use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::error::DataSourceError;
use crate::models::{DonorRecord, DonorTable};

/// Read a delimited donor file into a [`DonorTable`]
///
/// The first line is the header. Quote characters are removed from the whole
/// file rather than interpreted, so a delimiter inside quotes still splits.
pub fn load_donor_table<P: AsRef<Path>>(
    path: P,
    delimiter: char,
) -> Result<DonorTable, DataSourceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_donor_table(path, &content, delimiter)?;

    tracing::info!(
        "Loaded {} donors from {} (columns: {:?})",
        table.len(),
        path.display(),
        table.columns
    );

    Ok(table)
}

/// Parse donor file contents already in memory
///
/// `source` only labels the error when the content is empty.
pub fn parse_donor_table<P: AsRef<Path>>(
    source: P,
    content: &str,
    delimiter: char,
) -> Result<DonorTable, DataSourceError> {
    let content = content.replace('"', "");
    let body = content.trim_start();
    let leading_lines = content[..content.len() - body.len()].matches('\n').count();
    let body = body.trim_end();
    if body.is_empty() {
        return Err(DataSourceError::Empty {
            path: source.as_ref().to_path_buf(),
        });
    }

    let mut lines = body.lines();
    let header_line = leading_lines + 1;

    let columns: Vec<String> = match lines.next() {
        Some(header) => header.split(delimiter).map(normalize_column).collect(),
        None => Vec::new(),
    };

    // Short rows simply lack the trailing columns; extra values are dropped
    let records = lines
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .enumerate()
        .map(|(row, (offset, line))| {
            let fields: HashMap<String, String> = columns
                .iter()
                .cloned()
                .zip(line.split(delimiter).map(str::to_string))
                .collect();
            DonorRecord::new(row, fields).with_line(header_line + offset + 1)
        })
        .collect();

    Ok(DonorTable { columns, records })
}

/// Trim and lower-case a header cell
#[inline]
pub fn normalize_column(raw: &str) -> String {
    raw.trim().to_lowercase()
}
