#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

use std::num::ParseIntError;
use thiserror::Error;

pub mod annotations;
pub mod config;
pub mod diff;
pub mod evidence;
pub mod extract;
pub mod output;
pub mod parser;
pub mod snapshot;
pub mod state;
pub mod term;
pub mod workflow;

pub use annotations::{AnnotationEntry, CrossReference, Record};
pub use config::{ExtractionConfig, OutputLayout, PassStrategy, ProbeMode, TaxonFilter};
pub use evidence::EvidenceVocabulary;
pub use output::{Emitter, SyntheticIds};
pub use snapshot::{MemorySnapshot, ReaderSnapshot, RecordDecoder, SnapshotSource};
pub use term::{OntologyCategory, TermGroup};

/// Only cross references of this database carry GO annotations
const GO_DATABASE: &str = "GO";

/// Expected number of accessions of a single entry
///
/// Most UniProtKB entries have only one primary and a handful of
/// secondary accessions, so they fit inline
const DEFAULT_NUM_ACCESSIONS: usize = 4;

/// Expected number of distinct experimental GO terms per entry and category
const DEFAULT_NUM_TERMS: usize = 8;

/// Number of digits appended to a namespace to form the first synthetic id
const SYNTHETIC_ID_WIDTH: usize = 7;

/// Main Error type for this crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GoExpError {
    /// Failed to open a file
    #[error("cannot open file {0}")]
    CannotOpenFile(String),
    /// Failed to parse a line of input data
    #[error("invalid data: {0}")]
    InvalidInput(String),
    /// Ontology category symbol or name is not one of `F`, `P`, `C`
    #[error("unknown ontology category: {0}")]
    UnknownCategory(String),
    /// A synthetic id namespace must consist of digits only
    #[error("invalid synthetic id namespace: {0}")]
    InvalidNamespace(String),
    /// Failed to parse an integer
    #[error("unable to parse Integer")]
    ParseIntError,
    /// The record decoder could not produce an entry
    #[error("unable to decode snapshot record: {0}")]
    Decode(String),
    /// Reading or writing failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Writing a mapping row failed
    #[error("unable to write mapping row: {0}")]
    Csv(#[from] csv::Error),
}

impl From<ParseIntError> for GoExpError {
    fn from(_: ParseIntError) -> Self {
        GoExpError::ParseIntError
    }
}

/// Shortcut for `Result<T, GoExpError>`
pub type GoExpResult<T> = Result<T, GoExpError>;
