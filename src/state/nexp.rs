use std::collections::HashMap;

use tracing::{debug, info, trace, warn};

use crate::annotations::{Accessions, Record};
use crate::config::TaxonFilter;
use crate::evidence::{self, EvidenceVocabulary};
use crate::snapshot::SnapshotSource;
use crate::term::OntologyCategory;
use crate::GoExpResult;

/// Accessions of records without experimental evidence in one category
///
/// A record qualifies if it has at least one GO annotation in the category,
/// but none of them is backed by an experimental evidence code. The index
/// keeps the full accession list of every qualifying record as one group, so
/// a later record matches when it shares any accession with any group.
///
/// # Examples
///
/// ```
/// use goexp::state::NexpIndex;
/// use goexp::OntologyCategory;
///
/// let mut index = NexpIndex::new(OntologyCategory::Bpo);
/// index.push_group(["P12345", "Q00001"]);
///
/// let accessions = vec![String::from("q00001")];
/// assert!(index.intersects(&accessions));
/// ```
#[derive(Debug, Clone)]
pub struct NexpIndex {
    category: OntologyCategory,
    groups: Vec<Accessions>,
    lookup: HashMap<String, usize>,
}

impl NexpIndex {
    /// Constructs an empty index for `category`
    pub fn new(category: OntologyCategory) -> Self {
        Self {
            category,
            groups: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Scans `snapshot` and collects all non-experimental-only records
    ///
    /// The snapshot is restarted before the scan.
    ///
    /// # Errors
    ///
    /// Any error from restarting or reading the snapshot
    pub fn build<S: SnapshotSource>(
        snapshot: &mut S,
        category: OntologyCategory,
        vocabulary: &EvidenceVocabulary,
        taxon: &TaxonFilter,
    ) -> GoExpResult<Self> {
        evidence::warn_if_degenerate(vocabulary);
        info!("Collecting {} accessions without experimental evidence", category);

        let mut index = NexpIndex::new(category);
        let mut scanned = 0usize;
        let mut in_taxon = 0usize;
        for entry in snapshot.scan()? {
            let entry = entry?;
            scanned += 1;
            if !taxon.accepts(&entry) {
                continue;
            }
            in_taxon += 1;
            if index.qualifies(&entry, vocabulary) {
                trace!(
                    "{:?} has only non-experimental {} annotations",
                    entry.primary_accession(),
                    category
                );
                index.push_group(entry.accessions().iter().map(String::as_str));
            }
        }

        if in_taxon == 0 && *taxon != TaxonFilter::All {
            warn!("No record of taxon {} in snapshot", taxon.namespace());
        }
        debug!(
            "Scanned {} records ({} in taxon), {} {} groups with {} accessions",
            scanned,
            in_taxon,
            index.len(),
            category,
            index.accession_count()
        );
        Ok(index)
    }

    /// Returns `true` if `entry` has annotations in the index' category,
    /// but none with experimental evidence
    pub fn qualifies<R: Record + ?Sized>(
        &self,
        entry: &R,
        vocabulary: &EvidenceVocabulary,
    ) -> bool {
        evidence::has_category(entry, self.category)
            && !evidence::has_experimental(entry, self.category, vocabulary)
    }

    /// Adds the accessions of one record as a group
    pub fn push_group<I, S>(&mut self, accessions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let group: Accessions = accessions.into_iter().map(Into::into).collect();
        let idx = self.groups.len();
        for acc in &group {
            self.lookup.entry(acc.to_ascii_uppercase()).or_insert(idx);
        }
        self.groups.push(group);
    }

    /// The index of the first group that shares an accession with `accessions`
    pub fn matching_group(&self, accessions: &[String]) -> Option<usize> {
        accessions
            .iter()
            .filter_map(|acc| self.lookup.get(&acc.to_ascii_uppercase()))
            .min()
            .copied()
    }

    /// Returns `true` if any group shares an accession with `accessions`
    pub fn intersects(&self, accessions: &[String]) -> bool {
        self.matching_group(accessions).is_some()
    }

    /// The category the index was built for
    pub fn category(&self) -> OntologyCategory {
        self.category
    }

    /// All accession groups, in snapshot order
    pub fn groups(&self) -> &[Accessions] {
        &self.groups
    }

    /// Number of groups (qualifying records)
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no record qualified
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct accessions (case-insensitive) over all groups
    pub fn accession_count(&self) -> usize {
        self.lookup.len()
    }
}
