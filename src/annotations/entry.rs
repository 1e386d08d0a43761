use smallvec::SmallVec;

use crate::annotations::{CrossReference, Record};
use crate::DEFAULT_NUM_ACCESSIONS;

/// The accessions of a single entry, primary accession first
pub type Accessions = SmallVec<[String; DEFAULT_NUM_ACCESSIONS]>;

/// A single protein record of a snapshot
///
/// Entries are produced by a record parser, read once during a pass and
/// then dropped. They are never modified by this crate.
///
/// # Examples
///
/// ```
/// use goexp::{AnnotationEntry, CrossReference, Record};
///
/// let entry = AnnotationEntry::new(["P12345", "Q00001"], "MKTAYIAKQR")
///     .with_taxon("9606")
///     .with_cross_reference(CrossReference::go("GO:0005737", "C", "IDA:UniProtKB"));
///
/// assert_eq!(entry.primary_accession(), Some("P12345"));
/// assert!(entry.matches_accession("q00001"));
/// assert!(entry.has_taxon("9606"));
/// assert_eq!(entry.cross_references().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationEntry {
    accessions: Accessions,
    taxon_ids: Vec<String>,
    sequence: String,
    cross_references: Vec<CrossReference>,
}

impl AnnotationEntry {
    /// Constructs an entry without taxonomy and cross references
    pub fn new<I, S>(accessions: I, sequence: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accessions: accessions.into_iter().map(Into::into).collect(),
            taxon_ids: Vec::new(),
            sequence: sequence.to_string(),
            cross_references: Vec::new(),
        }
    }

    /// Adds a taxonomy id
    #[must_use]
    pub fn with_taxon(mut self, taxon_id: &str) -> Self {
        self.taxon_ids.push(taxon_id.to_string());
        self
    }

    /// Appends a cross reference
    #[must_use]
    pub fn with_cross_reference(mut self, xref: CrossReference) -> Self {
        self.cross_references.push(xref);
        self
    }

    /// Appends a cross reference
    pub fn add_cross_reference(&mut self, xref: CrossReference) {
        self.cross_references.push(xref);
    }

    /// Adds a taxonomy id
    pub fn add_taxon(&mut self, taxon_id: &str) {
        self.taxon_ids.push(taxon_id.to_string());
    }
}

impl Record for AnnotationEntry {
    fn accessions(&self) -> &[String] {
        &self.accessions
    }

    fn taxon_ids(&self) -> &[String] {
        &self.taxon_ids
    }

    fn sequence(&self) -> &str {
        &self.sequence
    }

    fn cross_references(&self) -> &[CrossReference] {
        &self.cross_references
    }
}
