//! Protein records and their database cross references
//!
//! This module contains the in-memory model of a single snapshot record:
//! [`AnnotationEntry`] and its [`CrossReference`]s.
//!
//! The crate does not parse raw database dumps. Any record type can be fed
//! into the classifiers and diff passes as long as it implements [`Record`],
//! so a parser crate only needs to provide this trait (or convert its records
//! into [`AnnotationEntry`]).

mod cross_reference;
mod entry;

pub use cross_reference::CrossReference;
pub use entry::{Accessions, AnnotationEntry};

/// Read access to the fields of a snapshot record that the crate needs
///
/// All extraction and diff passes are generic over this trait.
pub trait Record {
    /// All accessions of the record, the primary accession first
    fn accessions(&self) -> &[String];

    /// The NCBI taxonomy ids the record belongs to
    fn taxon_ids(&self) -> &[String];

    /// The raw amino acid sequence
    fn sequence(&self) -> &str;

    /// Database cross references, in the order of the record
    fn cross_references(&self) -> &[CrossReference];

    /// The primary (first) accession, if the record has any
    fn primary_accession(&self) -> Option<&str> {
        self.accessions().first().map(String::as_str)
    }

    /// Returns `true` if `taxon_id` is one of the record's taxonomy ids
    fn has_taxon(&self, taxon_id: &str) -> bool {
        self.taxon_ids().iter().any(|id| id == taxon_id)
    }

    /// Returns `true` if `accession` matches any of the record's accessions
    ///
    /// Accessions are compared case-insensitively
    fn matches_accession(&self, accession: &str) -> bool {
        self.accessions()
            .iter()
            .any(|acc| acc.eq_ignore_ascii_case(accession))
    }
}
