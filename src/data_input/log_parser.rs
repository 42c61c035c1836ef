// src/data_input/log_parser.rs

use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::constants::{CANDIDATE_DELIMITERS, HEADER_MIN_DELIMITERS, TIME_COLUMN_PATTERN};
use crate::data_input::log_table::LogTable;
use crate::error::{AnalysisError, Result};

/// Opens and parses a blackbox CSV log from disk.
pub fn parse_log_file(input_file_path: &Path) -> Result<LogTable> {
    let file = File::open(input_file_path)?;
    parse_log(BufReader::new(file))
}

/// Parses a blackbox CSV log from any reader.
///
/// Lines before the header are metadata. The header is the first line that mentions
/// "time" and carries more than `HEADER_MIN_DELIMITERS` delimiters. Rows with the wrong
/// field count are skipped; cells that are not finite numbers become `None`.
pub fn parse_log<R: Read>(mut reader: R) -> Result<LogTable> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    let content = String::from_utf8_lossy(&raw);
    let lines: Vec<&str> = content.lines().collect();

    let (header_line_idx, delimiter) = match locate_header(&lines) {
        Some(found) => found,
        None => {
            // No qualifying header; fall back to the first non-empty line and let
            // channel resolution decide whether it is usable.
            let first = lines
                .iter()
                .position(|line| !line.trim().is_empty())
                .ok_or(AnalysisError::EmptyLog)?;
            warn!("Could not locate a CSV header line; using line {} as header", first + 1);
            (first, detect_delimiter(lines[first]).0)
        }
    };
    info!(
        "Found CSV header at line {} (delimiter {:?})",
        header_line_idx + 1,
        delimiter as char
    );

    // --- Metadata Extraction ---
    let metadata: Vec<(String, String)> = lines[..header_line_idx]
        .iter()
        .filter_map(|line| parse_metadata_line(line))
        .collect();
    debug!("Extracted {} metadata entries", metadata.len());
    for (key, value) in metadata.iter().take(5) {
        debug!("  '{}' = '{}'", key, value);
    }

    // --- Data Reading and Storage ---
    let csv_content = lines[header_line_idx..].join("\n");
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let header_names: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    debug!("Headers found in CSV: {:?}", header_names);

    let mut rows: Vec<Vec<Option<f64>>> = Vec::new();
    let mut skipped_rows = 0usize;
    for (row_index, result) in csv_reader.records().enumerate() {
        match result {
            Ok(record) => {
                if record.len() != header_names.len() {
                    debug!(
                        "Skipping row {} due to field count {} (expected {})",
                        row_index + 1,
                        record.len(),
                        header_names.len()
                    );
                    skipped_rows += 1;
                    continue;
                }
                rows.push(record.iter().map(parse_value).collect());
            }
            Err(e) => {
                debug!("Skipping row {} due to CSV read error: {}", row_index + 1, e);
                skipped_rows += 1;
            }
        }
    }

    if skipped_rows > 0 {
        warn!("Skipped {} malformed data rows", skipped_rows);
    }
    info!("Finished reading {} data rows.", rows.len());

    if rows.is_empty() {
        return Err(AnalysisError::EmptyLog);
    }

    Ok(LogTable::from_rows(header_names, rows, metadata))
}

/// Finds the header line and its delimiter.
fn locate_header(lines: &[&str]) -> Option<(usize, u8)> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        if !line.to_lowercase().contains(TIME_COLUMN_PATTERN) {
            return None;
        }
        let (delimiter, count) = detect_delimiter(line);
        (count > HEADER_MIN_DELIMITERS).then_some((idx, delimiter))
    })
}

/// Picks the candidate delimiter that occurs most often in `line`. Comma wins ties.
fn detect_delimiter(line: &str) -> (u8, usize) {
    let mut best = (CANDIDATE_DELIMITERS[0], 0usize);
    for &candidate in CANDIDATE_DELIMITERS.iter() {
        let count = line.bytes().filter(|&b| b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best
}

/// Parses a `"key","value"` metadata line.
fn parse_metadata_line(line: &str) -> Option<(String, String)> {
    let trimmed_line = line.trim();
    if trimmed_line.is_empty() {
        return None;
    }
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(trimmed_line.as_bytes());
    let record = rdr.records().next()?.ok()?;
    if record.len() < 2 {
        return None;
    }
    let key = record.get(0).unwrap_or("").trim().trim_matches('"').to_string();
    let value = record.get(1).unwrap_or("").trim().trim_matches('"').to_string();
    (!key.is_empty()).then_some((key, value))
}

fn parse_value(val_str: &str) -> Option<f64> {
    val_str.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}


// src/data_input/log_parser.rs
