//! File level entry points
//!
//! Each workflow opens the output files of a category right before its pass
//! and flushes them right after, so the outputs of different categories are
//! never written at the same time (except with [`PassStrategy::SinglePass`],
//! which writes all categories in one pass by definition).
//!
//! File names follow the [`OutputLayout`] of the config:
//! `<directory>/<prefix>_<CATEGORY>.fasta` and `<directory>/<prefix>_<CATEGORY>.tsv`.
//! Output files are created even if a pass emits nothing.
//!
//! [`OutputLayout`]: crate::OutputLayout
use std::fs::File;
use std::path::Path;

use tracing::{debug, info};

use crate::config::{ExtractionConfig, PassStrategy};
use crate::diff;
use crate::extract;
use crate::output::{CategoryOutput, Emitter, PassSummary};
use crate::parser;
use crate::snapshot::SnapshotSource;
use crate::state::NexpIndex;
use crate::term::OntologyCategory;
use crate::GoExpResult;

/// Writes the training set of every configured category
///
/// With [`PassStrategy::PerCategory`] the snapshot is scanned once per
/// category, otherwise all categories are written in one pass.
///
/// # Examples
///
/// ```
/// use goexp::{AnnotationEntry, CrossReference, ExtractionConfig, MemorySnapshot, OutputLayout};
/// use goexp::workflow::create_training_sets;
///
/// let dir = std::env::temp_dir().join("goexp_doc_training");
/// std::fs::create_dir_all(&dir).unwrap();
///
/// let mut snapshot = MemorySnapshot::new(vec![
///     AnnotationEntry::new(["P12345"], "MKV")
///         .with_cross_reference(CrossReference::go("GO:0005634", "C", "IDA:SGD")),
/// ]);
/// let config = ExtractionConfig::default().with_output(OutputLayout::new(&dir, "train"));
///
/// let summaries = create_training_sets(&mut snapshot, &config).unwrap();
/// assert_eq!(summaries.len(), 3);
/// assert_eq!(summaries[2].emitted, 1);
///
/// let mapping = std::fs::read_to_string(dir.join("train_CCO.tsv")).unwrap();
/// assert_eq!(mapping, "10000001\tP12345\tGO:0005634\n");
/// ```
///
/// # Errors
///
/// - [`crate::GoExpError::CannotOpenFile`] if an output file cannot be created
/// - [`crate::GoExpError::InvalidNamespace`] if the taxon id is not numeric
/// - Any error from reading the snapshot or writing the outputs
pub fn create_training_sets<S: SnapshotSource>(
    snapshot: &mut S,
    config: &ExtractionConfig,
) -> GoExpResult<Vec<PassSummary>> {
    let taxon = config.taxon();
    let layout = config.output();

    match config.strategy() {
        PassStrategy::PerCategory => {
            let mut summaries = Vec::with_capacity(config.categories().len());
            for category in config.categories() {
                let mut output = open_output(*category, config)?;
                let summary =
                    extract::training_set(snapshot, config.vocabulary(), taxon, &mut output)?;
                output.finish()?;
                summaries.push(summary);
            }
            Ok(summaries)
        }
        PassStrategy::SinglePass => {
            let mut outputs = config
                .categories()
                .iter()
                .map(|category| open_output(*category, config))
                .collect::<GoExpResult<Vec<CategoryOutput<File, File>>>>()?;
            debug!(
                "Writing {} training sets to {}",
                outputs.len(),
                layout.directory().display()
            );
            let summaries = extract::training_sets_single_pass(
                snapshot,
                config.vocabulary(),
                taxon,
                &mut outputs,
            )?;
            for output in outputs {
                output.finish()?;
            }
            Ok(summaries)
        }
    }
}

/// Writes the test set of every configured category
///
/// For each category the t1 snapshot is scanned for proteins that had
/// annotations, but no experimental evidence, in that category. Then all of
/// `t2` is searched for those proteins and the ones with experimental
/// evidence are written.
///
/// The taxon filter only applies to `t1`.
///
/// # Errors
///
/// - [`crate::GoExpError::CannotOpenFile`] if an output file cannot be created
/// - [`crate::GoExpError::InvalidNamespace`] if the taxon id is not numeric
/// - Any error from reading the snapshots or writing the outputs
pub fn create_test_sets<S1, S2>(
    t1: &mut S1,
    t2: &mut S2,
    config: &ExtractionConfig,
) -> GoExpResult<Vec<PassSummary>>
where
    S1: SnapshotSource,
    S2: SnapshotSource,
{
    let mut summaries = Vec::with_capacity(config.categories().len());
    for category in config.categories() {
        let index = NexpIndex::build(t1, *category, config.vocabulary(), config.taxon())?;
        let mut output = open_output(*category, config)?;
        let summary = diff::nexp_diff(&index, t2, config.vocabulary(), &mut output)?;
        output.finish()?;
        summaries.push(summary);
    }
    Ok(summaries)
}

/// Writes the reevaluation set of `category`
///
/// Reads the prior term mapping from `prior_map` and searches `t2` for
/// proteins that gained experimental terms, using the probe mode of
/// `config`. The output reuses the target ids of the prior mapping.
///
/// # Errors
///
/// - [`crate::GoExpError::CannotOpenFile`] if the prior mapping cannot be
///   read or an output file cannot be created
/// - [`crate::GoExpError::InvalidInput`] if the prior mapping is malformed
/// - Any error from reading `t2` or writing the output
pub fn create_reevaluation_set<P, S>(
    prior_map: P,
    t2: &mut S,
    category: OntologyCategory,
    config: &ExtractionConfig,
) -> GoExpResult<PassSummary>
where
    P: AsRef<Path>,
    S: SnapshotSource,
{
    let prior = parser::parse_term_map(prior_map.as_ref())?;
    info!(
        "Loaded {} prior proteins with {} terms from {}",
        prior.len(),
        prior.term_count(),
        prior_map.as_ref().display()
    );

    let layout = config.output();
    let mut emitter = Emitter::create(
        layout.sequence_path(category),
        layout.mapping_path(category),
    )?;
    let summary = diff::reevaluation_diff(
        &prior,
        t2,
        category,
        config.vocabulary(),
        config.probe_mode(),
        &mut emitter,
    )?;
    emitter.finish()?;
    Ok(summary)
}

fn open_output(
    category: OntologyCategory,
    config: &ExtractionConfig,
) -> GoExpResult<CategoryOutput<File, File>> {
    CategoryOutput::create(category, config.taxon().synthetic_ids()?, config.output())
}
