//! Training set extraction and gene counts from a single snapshot
//!
//! A training set of a category contains every protein that has at least
//! one experimentally supported GO term in that category. The records get
//! sequential synthetic ids and one mapping row listing all their
//! experimental terms.
//!
//! The counting functions run the same classification for all three
//! categories at once and only return numbers or term sets.
use std::io::Write;

use tracing::{debug, info, warn};

use crate::annotations::Record;
use crate::config::TaxonFilter;
use crate::evidence::{self, EvidenceVocabulary, TermsByCategory};
use crate::output::{CategoryOutput, PassSummary, RowFormat};
use crate::snapshot::SnapshotSource;
use crate::term::{OntologyCategory, TermGroup};
use crate::GoExpResult;

/// Writes the training set of one category in a full pass over `snapshot`
///
/// The snapshot is restarted before the pass.
///
/// # Errors
///
/// Any error from reading `snapshot` or writing the output
pub fn training_set<S, W, M>(
    snapshot: &mut S,
    vocabulary: &EvidenceVocabulary,
    taxon: &TaxonFilter,
    output: &mut CategoryOutput<W, M>,
) -> GoExpResult<PassSummary>
where
    S: SnapshotSource,
    W: Write,
    M: Write,
{
    let category = output.category();
    evidence::warn_if_degenerate(vocabulary);
    info!("Creating training set for {} ontology", category);

    let mut summary = PassSummary::new(category);
    for entry in snapshot.scan()? {
        let entry = entry?;
        summary.scanned += 1;
        if !taxon.accepts(&entry) {
            continue;
        }
        summary.selected += 1;

        let terms = evidence::experimental_terms(&entry, category, vocabulary);
        if terms.is_empty() {
            continue;
        }
        let accession = entry.primary_accession().unwrap_or_default();
        output.emit(accession, entry.sequence(), terms, RowFormat::Joined)?;
        summary.emitted += 1;
    }

    log_summary(&summary, taxon);
    Ok(summary)
}

/// Writes the training sets of several categories in one pass over `snapshot`
///
/// Every output receives exactly the records, ids and rows that
/// [`training_set`] would write for its category. Outputs must be of
/// distinct categories.
///
/// # Errors
///
/// Any error from reading `snapshot` or writing the outputs
pub fn training_sets_single_pass<S, W, M>(
    snapshot: &mut S,
    vocabulary: &EvidenceVocabulary,
    taxon: &TaxonFilter,
    outputs: &mut [CategoryOutput<W, M>],
) -> GoExpResult<Vec<PassSummary>>
where
    S: SnapshotSource,
    W: Write,
    M: Write,
{
    evidence::warn_if_degenerate(vocabulary);
    info!(
        "Creating training sets for {} ontologies in a single pass",
        outputs.len()
    );

    let mut summaries: Vec<PassSummary> = outputs
        .iter()
        .map(|output| PassSummary::new(output.category()))
        .collect();

    for entry in snapshot.scan()? {
        let entry = entry?;
        let selected = taxon.accepts(&entry);
        let mut terms = if selected {
            evidence::experimental_terms_by_category(&entry, vocabulary)
        } else {
            TermsByCategory::default()
        };

        for (output, summary) in outputs.iter_mut().zip(summaries.iter_mut()) {
            summary.scanned += 1;
            if !selected {
                continue;
            }
            summary.selected += 1;

            let category_terms = terms.take(output.category());
            if category_terms.is_empty() {
                continue;
            }
            let accession = entry.primary_accession().unwrap_or_default();
            output.emit(accession, entry.sequence(), category_terms, RowFormat::Joined)?;
            summary.emitted += 1;
        }
    }

    for summary in &summaries {
        log_summary(summary, taxon);
    }
    Ok(summaries)
}

fn log_summary(summary: &PassSummary, taxon: &TaxonFilter) {
    if summary.selected == 0 && *taxon != TaxonFilter::All {
        warn!("No record of taxon {} in snapshot", taxon.namespace());
    }
    info!(
        "{}: {} of {} selected proteins have experimental evidence ({} scanned)",
        summary.category, summary.emitted, summary.selected, summary.scanned
    );
}

/// Number of proteins with experimental evidence, per category
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GeneCounts {
    counts: [usize; 3],
    proteins: usize,
}

impl GeneCounts {
    /// The number of proteins with experimental evidence in `category`
    pub fn get(&self, category: OntologyCategory) -> usize {
        self.counts[category.index()]
    }

    /// Molecular function count
    pub fn mfo(&self) -> usize {
        self.get(OntologyCategory::Mfo)
    }

    /// Biological process count
    pub fn bpo(&self) -> usize {
        self.get(OntologyCategory::Bpo)
    }

    /// Cellular component count
    pub fn cco(&self) -> usize {
        self.get(OntologyCategory::Cco)
    }

    /// Number of proteins that passed the taxon filter
    pub fn proteins(&self) -> usize {
        self.proteins
    }
}

/// Counts the proteins with experimental evidence in each category
///
/// A single pass over `snapshot`; the cross references of a record are
/// only scanned until all three categories have an experimental hit.
///
/// # Examples
///
/// ```
/// use goexp::{AnnotationEntry, CrossReference, EvidenceVocabulary, MemorySnapshot, TaxonFilter};
/// use goexp::extract::count_genes;
///
/// let mut snapshot = MemorySnapshot::new(vec![
///     AnnotationEntry::new(["P1"], "M")
///         .with_cross_reference(CrossReference::go("GO:0005737", "C", "IDA:SGD")),
///     AnnotationEntry::new(["P2"], "M")
///         .with_cross_reference(CrossReference::go("GO:0005737", "C", "IEA:SGD")),
/// ]);
///
/// let counts = count_genes(
///     &mut snapshot,
///     &EvidenceVocabulary::experimental(),
///     &TaxonFilter::All,
/// ).unwrap();
/// assert_eq!(counts.cco(), 1);
/// assert_eq!(counts.mfo(), 0);
/// assert_eq!(counts.proteins(), 2);
/// ```
///
/// # Errors
///
/// Any error from reading `snapshot`
pub fn count_genes<S: SnapshotSource>(
    snapshot: &mut S,
    vocabulary: &EvidenceVocabulary,
    taxon: &TaxonFilter,
) -> GoExpResult<GeneCounts> {
    evidence::warn_if_degenerate(vocabulary);
    let mut counts = GeneCounts::default();
    for entry in snapshot.scan()? {
        let entry = entry?;
        if !taxon.accepts(&entry) {
            continue;
        }
        counts.proteins += 1;
        let flags = evidence::experimental_categories(&entry, vocabulary);
        for category in OntologyCategory::ALL {
            if flags.contains(category) {
                counts.counts[category.index()] += 1;
            }
        }
    }
    debug!(
        "Gene counts MFO: {}, BPO: {}, CCO: {} of {} proteins",
        counts.mfo(),
        counts.bpo(),
        counts.cco(),
        counts.proteins
    );
    Ok(counts)
}

/// Gene counts of a series of snapshots, e.g. consecutive releases
///
/// Returns the label and counts of every snapshot, in the given order.
///
/// # Errors
///
/// Any error from reading one of the snapshots
pub fn count_genes_series<'a, S, I>(
    snapshots: I,
    vocabulary: &EvidenceVocabulary,
    taxon: &TaxonFilter,
) -> GoExpResult<Vec<(String, GeneCounts)>>
where
    S: SnapshotSource + 'a,
    I: IntoIterator<Item = (&'a str, &'a mut S)>,
{
    let mut series = Vec::new();
    for (label, snapshot) in snapshots {
        info!("Counting genes of {}", label);
        let counts = count_genes(snapshot, vocabulary, taxon)?;
        series.push((label.to_string(), counts));
    }
    Ok(series)
}

/// The experimental terms of a single protein, per category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinTerms {
    accession: String,
    terms: TermsByCategory,
}

impl ProteinTerms {
    /// The primary accession of the protein
    pub fn accession(&self) -> &str {
        &self.accession
    }

    /// The experimental terms of `category`
    pub fn terms(&self, category: OntologyCategory) -> &TermGroup {
        self.terms.get(category)
    }
}

/// The experimental terms of all proteins of a snapshot, in snapshot order
pub type CategoryTerms = Vec<ProteinTerms>;

/// Collects the experimental terms of every protein, in snapshot order
///
/// Proteins without any experimental term are included with empty sets.
///
/// # Errors
///
/// Any error from reading `snapshot`
pub fn collect_terms<S: SnapshotSource>(
    snapshot: &mut S,
    vocabulary: &EvidenceVocabulary,
    taxon: &TaxonFilter,
) -> GoExpResult<CategoryTerms> {
    evidence::warn_if_degenerate(vocabulary);
    let mut proteins = Vec::new();
    for entry in snapshot.scan()? {
        let entry = entry?;
        if !taxon.accepts(&entry) {
            continue;
        }
        proteins.push(ProteinTerms {
            accession: entry.primary_accession().unwrap_or_default().to_string(),
            terms: evidence::experimental_terms_by_category(&entry, vocabulary),
        });
    }
    debug!("Collected terms of {} proteins", proteins.len());
    Ok(proteins)
}
