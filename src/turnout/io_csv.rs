// Primitives for reading the CSV turnout table.

use std::io::Read;
use std::path::Path;

use snafu::prelude::*;
use turnout_engine::normalize::EXPECTED_COLUMNS;

use crate::turnout::*;

/// Reads all the rows of the table, keyed by the (trimmed) header names.
pub fn read_turnout_csv(path: &Path) -> TurnoutResult<Vec<RawRow>> {
    let path_s = path.display().to_string();
    info!("Attempting to read turnout file {:?}", path_s);
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path: path_s })?;
    read_rows(rdr)
}

pub fn read_turnout_from<R: Read>(input: R) -> TurnoutResult<Vec<RawRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    read_rows(rdr)
}

fn read_rows<R: Read>(mut rdr: csv::Reader<R>) -> TurnoutResult<Vec<RawRow>> {
    let headers: Vec<String> = rdr
        .headers()
        .context(CsvHeaderParseSnafu {})?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    debug!("read_rows: headers {:?}", headers);
    for col in EXPECTED_COLUMNS.iter() {
        if !headers.iter().any(|h| h == col) {
            warn!("Column {} is missing from the turnout table", col);
        }
    }

    let mut res: Vec<RawRow> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // Line 1 is the header
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        if line.len() != headers.len() {
            debug!(
                "read_rows: line {} has {} fields, expected {}",
                lineno,
                line.len(),
                headers.len()
            );
        }
        let row: RawRow = headers
            .iter()
            .zip(line.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        res.push(row);
    }
    info!("Read {} rows from the turnout table", res.len());
    Ok(res)
}
