//! Parsing of prior term-mapping files
//!
//! A term-mapping file is the mapping output of an earlier run: a
//! tab-delimited file with one row per (target, term) pair.
//!
//! ```text
//! T100001 P12345  GO:0005737
//! T100001 P12345  GO:0005634
//! T100002 Q9Y6K9  GO:0003677
//! ```
//!
//! Column 1 is the target id, column 2 the protein accession and column 3
//! the GO term. Any further columns are ignored.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, trace};

use crate::state::PriorTermMap;
use crate::GoExpError;
use crate::GoExpResult;

/// A single row of a term-mapping file
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MappingRow<'a> {
    pub(crate) target_id: &'a str,
    pub(crate) accession: &'a str,
    pub(crate) term_id: &'a str,
}

/// Parses a single line of a term-mapping file
///
/// Returns `Ok(None)` for blank lines
pub(crate) fn mapping_line(line: &str) -> GoExpResult<Option<MappingRow<'_>>> {
    let line = line.trim_end_matches(&['\n', '\r'][..]);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let mut cols = line.split('\t').map(str::trim);

    // Column 1 is the target id
    let Some(target_id) = cols.next().filter(|col| !col.is_empty()) else {
        return Err(GoExpError::InvalidInput(line.to_string()));
    };

    // Column 2 is the protein accession
    let Some(accession) = cols.next().filter(|col| !col.is_empty()) else {
        return Err(GoExpError::InvalidInput(line.to_string()));
    };

    // Column 3 is the GO term
    let Some(term_id) = cols.next().filter(|col| !col.is_empty()) else {
        return Err(GoExpError::InvalidInput(line.to_string()));
    };

    Ok(Some(MappingRow {
        target_id,
        accession,
        term_id,
    }))
}

/// Parses a term-mapping file into a [`PriorTermMap`]
///
/// # Errors
///
/// - [`GoExpError::CannotOpenFile`]: Source file not present or can't be opened
/// - [`GoExpError::InvalidInput`]: A line has fewer than three columns
/// - [`GoExpError::Io`]: The file cannot be read
pub fn parse_term_map<P: AsRef<Path>>(file: P) -> GoExpResult<PriorTermMap> {
    let filename = file.as_ref().display().to_string();
    let file = File::open(file).map_err(|_| GoExpError::CannotOpenFile(filename.clone()))?;
    let map = read_term_map(BufReader::new(file))?;
    debug!(
        "Parsed {} prior keys with {} terms from {}",
        map.len(),
        map.term_count(),
        filename
    );
    Ok(map)
}

/// Reads a term-mapping from any buffered reader
///
/// # Errors
///
/// - [`GoExpError::InvalidInput`]: A line has fewer than three columns
/// - [`GoExpError::Io`]: The data cannot be read
pub fn read_term_map<R: BufRead>(reader: R) -> GoExpResult<PriorTermMap> {
    let mut map = PriorTermMap::new();
    for line in reader.lines() {
        let line = line?;
        match mapping_line(&line)? {
            Some(row) => map.insert(row.target_id, row.accession, row.term_id),
            None => trace!("Skipping blank line"),
        }
    }
    Ok(map)
}
