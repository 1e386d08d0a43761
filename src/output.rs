//! Writing of sequence and mapping files
//!
//! Every emitted record produces one FASTA entry in the sequence output and
//! one or more tab-delimited rows in the mapping output.
//!
//! Training sets use one row per record with all terms comma-joined:
//!
//! ```text
//! 10000001    P12345  GO:0005634,GO:0005737
//! ```
//!
//! Test and reevaluation sets use one row per term:
//!
//! ```text
//! 10000001    P12345  GO:0005634
//! 10000001    P12345  GO:0005737
//! ```
use std::fs::File;
use std::io::Write;
use std::path::Path;

use bio::io::fasta;
use tracing::{debug, trace};

use crate::term::{OntologyCategory, TermGroup};
use crate::GoExpError;
use crate::GoExpResult;
use crate::SYNTHETIC_ID_WIDTH;

/// Sequential synthetic ids within one namespace
///
/// The first id is the namespace followed by `0000001`, every further id
/// is one larger than the previous one.
///
/// # Examples
///
/// ```
/// use goexp::SyntheticIds;
///
/// let mut ids = SyntheticIds::new("1").unwrap();
/// assert_eq!(ids.next_id(), 10000001);
/// assert_eq!(ids.next_id(), 10000002);
///
/// let mut yeast = SyntheticIds::new("559292").unwrap();
/// assert_eq!(yeast.next_id(), 5592920000001);
///
/// assert!(SyntheticIds::new("human").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticIds {
    base: u64,
    next: u64,
}

impl SyntheticIds {
    /// Constructs a counter for `namespace`
    ///
    /// # Errors
    ///
    /// [`GoExpError::InvalidNamespace`] if the namespace is empty, contains
    /// anything but ASCII digits or is too long to form a 64 bit id
    pub fn new(namespace: &str) -> GoExpResult<Self> {
        if namespace.is_empty() || !namespace.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GoExpError::InvalidNamespace(namespace.to_string()));
        }
        let base = format!("{namespace}{:0width$}", 1, width = SYNTHETIC_ID_WIDTH)
            .parse::<u64>()
            .map_err(|_| GoExpError::InvalidNamespace(namespace.to_string()))?;
        Ok(Self { base, next: base })
    }

    /// Returns the next id and advances the counter
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to [`SyntheticIds::next_id`] will return
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Number of ids handed out so far
    pub fn allocated(&self) -> u64 {
        self.next - self.base
    }
}

/// One unit of output: an id, the accession it describes and its terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRecord {
    id: String,
    accession: String,
    category: OntologyCategory,
    terms: TermGroup,
}

impl ExtractionRecord {
    /// Constructs a new record
    pub fn new(id: &str, accession: &str, category: OntologyCategory, terms: TermGroup) -> Self {
        Self {
            id: id.to_string(),
            accession: accession.to_string(),
            category,
            terms,
        }
    }

    /// The synthetic or target id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The protein accession
    pub fn accession(&self) -> &str {
        &self.accession
    }

    /// The category of the terms
    pub fn category(&self) -> OntologyCategory {
        self.category
    }

    /// The experimental (or gained) terms
    pub fn terms(&self) -> &TermGroup {
        &self.terms
    }
}

/// Layout of the mapping rows of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    /// A single row with all terms comma-joined
    Joined,
    /// One row per term
    PerTerm,
}

/// Writes records to a sequence and a mapping output
///
/// The outputs are buffered; call [`Emitter::finish`] to flush them and
/// surface write errors.
pub struct Emitter<S: Write, M: Write> {
    sequences: fasta::Writer<S>,
    mappings: csv::Writer<M>,
    records: usize,
    rows: usize,
}

impl Emitter<File, File> {
    /// Creates (or truncates) the two output files
    ///
    /// # Errors
    ///
    /// [`GoExpError::CannotOpenFile`] if either file cannot be created
    pub fn create<P: AsRef<Path>, Q: AsRef<Path>>(
        sequence_path: P,
        mapping_path: Q,
    ) -> GoExpResult<Self> {
        let sequences = create_file(sequence_path.as_ref())?;
        let mappings = create_file(mapping_path.as_ref())?;
        debug!(
            "Writing to {} and {}",
            sequence_path.as_ref().display(),
            mapping_path.as_ref().display()
        );
        Ok(Self::new(sequences, mappings))
    }
}

fn create_file(path: &Path) -> GoExpResult<File> {
    File::create(path).map_err(|_| GoExpError::CannotOpenFile(path.display().to_string()))
}

impl<S: Write, M: Write> Emitter<S, M> {
    /// Constructs an emitter from two writers
    pub fn new(sequences: S, mappings: M) -> Self {
        Self {
            sequences: fasta::Writer::new(sequences),
            mappings: csv::WriterBuilder::new()
                .delimiter(b'\t')
                .has_headers(false)
                .quote_style(csv::QuoteStyle::Never)
                .from_writer(mappings),
            records: 0,
            rows: 0,
        }
    }

    /// Writes the sequence entry and the mapping rows of `record`
    ///
    /// # Errors
    ///
    /// [`GoExpError::Io`] or [`GoExpError::Csv`] if writing fails
    pub fn write(
        &mut self,
        record: &ExtractionRecord,
        sequence: &str,
        format: RowFormat,
    ) -> GoExpResult<()> {
        trace!("Writing {} ({})", record.id(), record.accession());
        self.sequences
            .write(record.id(), Some(record.accession()), sequence.as_bytes())?;
        self.records += 1;

        match format {
            RowFormat::Joined => {
                let joined = record.terms().join(",");
                self.mappings
                    .write_record([record.id(), record.accession(), joined.as_str()])?;
                self.rows += 1;
            }
            RowFormat::PerTerm => {
                for term in record.terms() {
                    self.mappings
                        .write_record([record.id(), record.accession(), term])?;
                    self.rows += 1;
                }
            }
        }
        Ok(())
    }

    /// Number of sequence entries written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Number of mapping rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes both outputs
    ///
    /// # Errors
    ///
    /// [`GoExpError::Io`] if flushing fails
    pub fn flush(&mut self) -> GoExpResult<()> {
        self.sequences.flush()?;
        self.mappings.flush()?;
        Ok(())
    }

    /// Flushes both outputs and closes the emitter
    ///
    /// Returns the number of sequence entries written
    ///
    /// # Errors
    ///
    /// [`GoExpError::Io`] if flushing fails
    pub fn finish(mut self) -> GoExpResult<usize> {
        self.flush()?;
        debug!("Wrote {} records, {} mapping rows", self.records, self.rows);
        Ok(self.records)
    }
}

impl<S: Write, M: Write> std::fmt::Debug for Emitter<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Emitter({} records, {} rows)", self.records, self.rows)
    }
}

/// Counters of a single pass over a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    /// The category of the pass
    pub category: OntologyCategory,
    /// Records read from the snapshot
    pub scanned: usize,
    /// Records that passed the taxon filter
    pub selected: usize,
    /// Records found in the prior state (diff passes only)
    pub matched: usize,
    /// Records written to the output
    pub emitted: usize,
}

impl PassSummary {
    /// Constructs a summary with all counters at zero
    pub fn new(category: OntologyCategory) -> Self {
        Self {
            category,
            scanned: 0,
            selected: 0,
            matched: 0,
            emitted: 0,
        }
    }
}

/// The output of one ontology category: an id counter plus an [`Emitter`]
///
/// Each category numbers its records independently, starting at the first
/// id of the namespace.
#[derive(Debug)]
pub struct CategoryOutput<S: Write, M: Write> {
    category: OntologyCategory,
    ids: SyntheticIds,
    emitter: Emitter<S, M>,
}

impl CategoryOutput<File, File> {
    /// Creates the output files of `category` as described by `layout`
    ///
    /// # Errors
    ///
    /// [`GoExpError::CannotOpenFile`] if either file cannot be created
    pub fn create(
        category: OntologyCategory,
        ids: SyntheticIds,
        layout: &crate::config::OutputLayout,
    ) -> GoExpResult<Self> {
        let emitter = Emitter::create(
            layout.sequence_path(category),
            layout.mapping_path(category),
        )?;
        Ok(Self::new(category, ids, emitter))
    }
}

impl<S: Write, M: Write> CategoryOutput<S, M> {
    /// Constructs a new output
    pub fn new(category: OntologyCategory, ids: SyntheticIds, emitter: Emitter<S, M>) -> Self {
        Self {
            category,
            ids,
            emitter,
        }
    }

    /// The category of the output
    pub fn category(&self) -> OntologyCategory {
        self.category
    }

    /// The id counter
    pub fn ids(&self) -> &SyntheticIds {
        &self.ids
    }

    /// Allocates the next synthetic id and writes a record with it
    ///
    /// # Errors
    ///
    /// [`GoExpError::Io`] or [`GoExpError::Csv`] if writing fails
    pub fn emit(
        &mut self,
        accession: &str,
        sequence: &str,
        terms: TermGroup,
        format: RowFormat,
    ) -> GoExpResult<ExtractionRecord> {
        let id = self.ids.next_id().to_string();
        let record = ExtractionRecord::new(&id, accession, self.category, terms);
        self.emitter.write(&record, sequence, format)?;
        Ok(record)
    }

    /// Flushes and closes the output, returns the number of records written
    ///
    /// # Errors
    ///
    /// [`GoExpError::Io`] if flushing fails
    pub fn finish(self) -> GoExpResult<usize> {
        self.emitter.finish()
    }
}
