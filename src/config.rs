//! Settings of extraction and diff runs
//!
//! Loading settings from files or command lines is left to the caller;
//! this module only provides the typed values the passes consume.
use std::path::{Path, PathBuf};

use crate::annotations::Record;
use crate::evidence::EvidenceVocabulary;
use crate::output::SyntheticIds;
use crate::term::OntologyCategory;
use crate::GoExpResult;

/// Namespace of synthetic ids when all species are extracted
const GLOBAL_NAMESPACE: &str = "1";

/// Restricts passes to the records of a single species
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaxonFilter {
    /// Records of all species
    #[default]
    All,
    /// Only records carrying this NCBI taxonomy id
    Taxon(String),
}

impl TaxonFilter {
    /// Constructs a filter for a single taxon
    pub fn taxon(taxon_id: &str) -> Self {
        TaxonFilter::Taxon(taxon_id.to_string())
    }

    /// Returns `true` if `entry` passes the filter
    pub fn accepts<R: Record + ?Sized>(&self, entry: &R) -> bool {
        match self {
            TaxonFilter::All => true,
            TaxonFilter::Taxon(taxon_id) => entry.has_taxon(taxon_id),
        }
    }

    /// The synthetic id namespace: `1` for all species, the taxon id otherwise
    pub fn namespace(&self) -> &str {
        match self {
            TaxonFilter::All => GLOBAL_NAMESPACE,
            TaxonFilter::Taxon(taxon_id) => taxon_id,
        }
    }

    /// A fresh id counter for this filter's namespace
    ///
    /// # Errors
    ///
    /// [`crate::GoExpError::InvalidNamespace`] if the taxon id is not numeric
    pub fn synthetic_ids(&self) -> GoExpResult<SyntheticIds> {
        SyntheticIds::new(self.namespace())
    }
}

/// How training extraction walks the snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PassStrategy {
    /// One full pass per category, restarting the snapshot in between
    #[default]
    PerCategory,
    /// A single pass that feeds all categories at once
    ///
    /// Produces the same output per category as [`PassStrategy::PerCategory`]
    SinglePass,
}

/// How far the reevaluation diff scans the later snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbeMode {
    /// Stop after the first record that gained terms
    #[default]
    FirstMatch,
    /// Scan the whole snapshot and report every record that gained terms
    Exhaustive,
}

/// Location and naming of output files
///
/// Every category gets its own pair of files:
/// `<directory>/<prefix>_<CATEGORY>.fasta` and `<directory>/<prefix>_<CATEGORY>.tsv`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    directory: PathBuf,
    prefix: String,
}

impl OutputLayout {
    /// Constructs a new layout
    pub fn new<P: AsRef<Path>>(directory: P, prefix: &str) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
        }
    }

    /// Output directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the sequence file of `category`
    pub fn sequence_path(&self, category: OntologyCategory) -> PathBuf {
        self.directory
            .join(format!("{}_{}.fasta", self.prefix, category))
    }

    /// Path of the mapping file of `category`
    pub fn mapping_path(&self, category: OntologyCategory) -> PathBuf {
        self.directory.join(format!("{}_{}.tsv", self.prefix, category))
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(".", "goexp")
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Settings shared by all workflows
///
/// ```mermaid
/// graph LR
///     S[Snapshot] --> C[Evidence classifier]
///     C --> B[State builder]
///     B --> D[Diff engine]
///     C --> D
///     D --> E[Emitter]
///     C --> E
/// ```
///
/// # Examples
///
/// ```
/// use goexp::{ExtractionConfig, OntologyCategory, TaxonFilter, ProbeMode};
///
/// let config = ExtractionConfig::default()
///     .with_taxon(TaxonFilter::taxon("559292"))
///     .with_categories(&[OntologyCategory::Bpo])
///     .with_probe_mode(ProbeMode::Exhaustive);
///
/// assert_eq!(config.categories(), &[OntologyCategory::Bpo]);
/// assert_eq!(config.taxon().namespace(), "559292");
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    vocabulary: EvidenceVocabulary,
    taxon: TaxonFilter,
    categories: Vec<OntologyCategory>,
    strategy: PassStrategy,
    probe: ProbeMode,
    output: OutputLayout,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vocabulary: EvidenceVocabulary::experimental(),
            taxon: TaxonFilter::All,
            categories: OntologyCategory::ALL.to_vec(),
            strategy: PassStrategy::default(),
            probe: ProbeMode::default(),
            output: OutputLayout::default(),
        }
    }
}

impl ExtractionConfig {
    /// Sets the experimental evidence codes
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: EvidenceVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Sets the species filter
    #[must_use]
    pub fn with_taxon(mut self, taxon: TaxonFilter) -> Self {
        self.taxon = taxon;
        self
    }

    /// Sets the categories to process, in the given order
    ///
    /// Duplicate categories are only processed once.
    #[must_use]
    pub fn with_categories(mut self, categories: &[OntologyCategory]) -> Self {
        self.categories.clear();
        for category in categories {
            if !self.categories.contains(category) {
                self.categories.push(*category);
            }
        }
        self
    }

    /// Parses categories from symbols or names, e.g. `["F", "BPO"]`
    ///
    /// # Errors
    ///
    /// [`crate::GoExpError::UnknownCategory`] for anything but
    /// `F`, `P`, `C`, `MFO`, `BPO` or `CCO`
    pub fn with_category_names<S: AsRef<str>>(self, names: &[S]) -> GoExpResult<Self> {
        let categories = names
            .iter()
            .map(|name| name.as_ref().parse::<OntologyCategory>())
            .collect::<GoExpResult<Vec<OntologyCategory>>>()?;
        Ok(self.with_categories(&categories))
    }

    /// Sets the pass strategy of training extraction
    #[must_use]
    pub fn with_strategy(mut self, strategy: PassStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the probe mode of the reevaluation diff
    #[must_use]
    pub fn with_probe_mode(mut self, probe: ProbeMode) -> Self {
        self.probe = probe;
        self
    }

    /// Sets where output files are written
    #[must_use]
    pub fn with_output(mut self, output: OutputLayout) -> Self {
        self.output = output;
        self
    }

    /// The experimental evidence codes
    pub fn vocabulary(&self) -> &EvidenceVocabulary {
        &self.vocabulary
    }

    /// The species filter
    pub fn taxon(&self) -> &TaxonFilter {
        &self.taxon
    }

    /// The categories to process
    pub fn categories(&self) -> &[OntologyCategory] {
        &self.categories
    }

    /// The pass strategy of training extraction
    pub fn strategy(&self) -> PassStrategy {
        self.strategy
    }

    /// The probe mode of the reevaluation diff
    pub fn probe_mode(&self) -> ProbeMode {
        self.probe
    }

    /// The output layout
    pub fn output(&self) -> &OutputLayout {
        &self.output
    }
}
