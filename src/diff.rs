//! Temporal diffs between two snapshots
//!
//! Both diffs stream the later snapshot (t2) once and consult state that was
//! built from the earlier time point (t1), see [`crate::state`].
//!
//! - [`reevaluation_diff`] compares t2 against a prior term mapping and
//!   reports the experimental terms a protein gained since. In
//!   [`ProbeMode::FirstMatch`] it stops at the first protein with a gain.
//! - [`nexp_diff`] reports all t2 proteins that had no experimental
//!   annotation in a category at t1, but have one at t2. These proteins form
//!   temporally valid test sets.
use std::io::Write;

use tracing::{info, trace};

use crate::annotations::Record;
use crate::config::ProbeMode;
use crate::evidence::{self, EvidenceVocabulary};
use crate::output::{CategoryOutput, Emitter, ExtractionRecord, PassSummary, RowFormat};
use crate::snapshot::SnapshotSource;
use crate::state::{NexpIndex, PriorTermMap};
use crate::term::OntologyCategory;
use crate::GoExpError;
use crate::GoExpResult;

/// Writes the proteins of `t2` that gained experimental terms over `prior`
///
/// For every t2 record, the prior key with a matching accession is looked up
/// (see [`PriorTermMap::find`]). The gain is the set of experimental t2 terms
/// of `category` minus the terms of that key. Records with a non-empty gain
/// are written with the key's target id and accession, one mapping row per
/// gained term.
///
/// With [`ProbeMode::FirstMatch`] the pass ends after the first record that
/// was written, so at most one record is emitted. [`ProbeMode::Exhaustive`]
/// scans the whole snapshot.
///
/// # Errors
///
/// Any error from reading `t2` or writing the output
pub fn reevaluation_diff<S, W, M>(
    prior: &PriorTermMap,
    t2: &mut S,
    category: OntologyCategory,
    vocabulary: &EvidenceVocabulary,
    probe: ProbeMode,
    emitter: &mut Emitter<W, M>,
) -> GoExpResult<PassSummary>
where
    S: SnapshotSource,
    W: Write,
    M: Write,
{
    evidence::warn_if_degenerate(vocabulary);
    info!(
        "Searching {} gains of {} prior proteins ({:?})",
        category,
        prior.len(),
        probe
    );

    let mut summary = PassSummary::new(category);
    for entry in t2.scan()? {
        let entry = entry?;
        summary.scanned += 1;
        summary.selected += 1;

        let Some(known) = prior.find(entry.accessions()) else {
            continue;
        };
        summary.matched += 1;

        let experimental = evidence::experimental_terms(&entry, category, vocabulary);
        if experimental.is_empty() {
            continue;
        }
        let gained = &experimental - known.terms();
        if gained.is_empty() {
            trace!("{} gained no {} terms", known.key(), category);
            continue;
        }

        let record = ExtractionRecord::new(known.target_id(), known.accession(), category, gained);
        emitter.write(&record, entry.sequence(), RowFormat::PerTerm)?;
        summary.emitted += 1;

        if probe == ProbeMode::FirstMatch {
            info!(
                "{} gained {} {} terms, stopping after first match",
                known.key(),
                record.terms().len(),
                category
            );
            return Ok(summary);
        }
    }

    info!(
        "{}: {} of {} proteins at t2 were known at t1, {} gained annotations",
        category, summary.matched, summary.scanned, summary.emitted
    );
    Ok(summary)
}

/// Writes the proteins of `t2` that gained experimental evidence since t1
///
/// `index` holds the accession groups of t1 records that had annotations in
/// its category, but none with experimental evidence. Every t2 record that
/// shares an accession with any group and now has experimental terms in the
/// category is written with a new synthetic id and its primary accession,
/// one mapping row per experimental term.
///
/// The whole snapshot is scanned.
///
/// # Errors
///
/// - [`GoExpError::InvalidInput`] if `index` and `output` are of different categories
/// - Any error from reading `t2` or writing the output
pub fn nexp_diff<S, W, M>(
    index: &NexpIndex,
    t2: &mut S,
    vocabulary: &EvidenceVocabulary,
    output: &mut CategoryOutput<W, M>,
) -> GoExpResult<PassSummary>
where
    S: SnapshotSource,
    W: Write,
    M: Write,
{
    let category = index.category();
    if output.category() != category {
        return Err(GoExpError::InvalidInput(format!(
            "{} index cannot feed the {} output",
            category,
            output.category()
        )));
    }
    evidence::warn_if_degenerate(vocabulary);
    info!(
        "Searching {} records of {} t1 proteins that gained experimental evidence",
        category,
        index.len()
    );

    let mut summary = PassSummary::new(category);
    for entry in t2.scan()? {
        let entry = entry?;
        summary.scanned += 1;
        summary.selected += 1;

        if !index.intersects(entry.accessions()) {
            continue;
        }
        summary.matched += 1;

        let terms = evidence::experimental_terms(&entry, category, vocabulary);
        if terms.is_empty() {
            continue;
        }

        let accession = entry.primary_accession().unwrap_or_default();
        let record = output.emit(accession, entry.sequence(), terms, RowFormat::PerTerm)?;
        trace!("{} -> {}", record.id(), accession);
        summary.emitted += 1;
    }

    info!(
        "{}: {} of {} t1 proteins found at t2, {} gained experimental evidence",
        category,
        summary.matched,
        index.len(),
        summary.emitted
    );
    Ok(summary)
}
