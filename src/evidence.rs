//! Classification of GO annotations by evidence code
//!
//! Every `GO` cross reference of a record carries an evidence code such as
//! `IDA` (inferred from direct assay) or `IEA` (inferred from electronic
//! annotation). A caller supplied [`EvidenceVocabulary`] decides which codes
//! count as *experimental*.
//!
//! The classifier has two modes:
//!
//! - [`ClassifyMode::Exists`] answers whether at least one matching cross
//!   reference exists and stops at the first hit.
//! - [`ClassifyMode::CollectAll`] scans all cross references and returns the
//!   set of matching terms.
//!
//! For all inputs, `Exists` is `true` exactly when `CollectAll` returns a
//! non-empty set.
use std::collections::HashSet;
use std::str::FromStr;

use tracing::warn;

use crate::annotations::{CrossReference, Record};
use crate::term::{OntologyCategory, TermGroup};
use crate::GoExpError;

/// Evidence codes regarded as experimental by CAFA
pub const EXPERIMENTAL_CODES: [&str; 8] = ["EXP", "IDA", "IPI", "IMP", "IGI", "IEP", "TAS", "IC"];

/// The set of evidence codes that are considered experimental
///
/// An empty vocabulary is valid, but no annotation will ever be classified
/// as experimental with it.
///
/// # Examples
///
/// ```
/// use goexp::EvidenceVocabulary;
///
/// let vocabulary: EvidenceVocabulary = "EXP, IDA".parse().unwrap();
/// assert!(vocabulary.contains("IDA"));
/// assert!(!vocabulary.contains("IEA"));
///
/// assert!(EvidenceVocabulary::experimental().contains("TAS"));
/// assert!(EvidenceVocabulary::new().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceVocabulary {
    codes: HashSet<String>,
}

impl EvidenceVocabulary {
    /// Constructs an empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// The default experimental evidence codes, see [`EXPERIMENTAL_CODES`]
    pub fn experimental() -> Self {
        EXPERIMENTAL_CODES.into_iter().collect()
    }

    /// Adds a code, returns `false` if it was already present
    pub fn insert(&mut self, code: &str) -> bool {
        self.codes.insert(code.to_string())
    }

    /// Returns `true` if `code` is part of the vocabulary
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Returns `true` if the vocabulary has no codes at all
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of codes in the vocabulary
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns all codes in alphabetical order
    pub fn sorted_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.codes.iter().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl<'a> FromIterator<&'a str> for EvidenceVocabulary {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self {
            codes: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

impl FromIterator<String> for EvidenceVocabulary {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

impl FromStr for EvidenceVocabulary {
    type Err = GoExpError;

    /// Parses a comma separated list of codes
    ///
    /// Whitespace around codes and empty items are ignored, so an empty
    /// string yields an empty vocabulary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut vocabulary = EvidenceVocabulary::new();
        for code in s.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            if code.contains(char::is_whitespace) || code.contains(':') {
                return Err(GoExpError::InvalidInput(format!(
                    "invalid evidence code '{code}'"
                )));
            }
            vocabulary.insert(code);
        }
        Ok(vocabulary)
    }
}

/// Logs a warning when passes are run with an empty vocabulary
pub(crate) fn warn_if_degenerate(vocabulary: &EvidenceVocabulary) {
    if vocabulary.is_empty() {
        warn!("Evidence vocabulary is empty, no annotation will be considered experimental");
    }
}

/// Selects which evidence codes a classification accepts
#[derive(Debug, Clone, Copy)]
pub enum EvidenceFilter<'a> {
    /// Accept every evidence code
    Any,
    /// Accept only codes of the vocabulary
    Codes(&'a EvidenceVocabulary),
}

impl EvidenceFilter<'_> {
    /// Returns `true` if the filter accepts `code`
    pub fn accepts(&self, code: &str) -> bool {
        match self {
            EvidenceFilter::Any => true,
            EvidenceFilter::Codes(vocabulary) => vocabulary.contains(code),
        }
    }
}

/// Determines how much work [`classify`] does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyMode {
    /// Stop at the first matching cross reference
    Exists,
    /// Collect the terms of all matching cross references
    CollectAll,
}

/// Result of [`classify`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Answer of [`ClassifyMode::Exists`]
    Exists(bool),
    /// Answer of [`ClassifyMode::CollectAll`]
    Terms(TermGroup),
}

impl Classification {
    /// Returns `true` if at least one cross reference matched
    pub fn is_match(&self) -> bool {
        match self {
            Classification::Exists(found) => *found,
            Classification::Terms(terms) => !terms.is_empty(),
        }
    }

    /// The collected terms, `None` for [`Classification::Exists`]
    pub fn into_terms(self) -> Option<TermGroup> {
        match self {
            Classification::Exists(_) => None,
            Classification::Terms(terms) => Some(terms),
        }
    }
}

/// All `GO` cross references of `entry` in `category` whose code passes `filter`
fn matching<'a, R: Record + ?Sized>(
    entry: &'a R,
    category: OntologyCategory,
    filter: EvidenceFilter<'a>,
) -> impl Iterator<Item = &'a CrossReference> + 'a {
    entry.cross_references().iter().filter(move |xref| {
        xref.is_go()
            && xref.category() == Some(category)
            && filter.accepts(xref.evidence_code())
    })
}

/// Classifies the GO annotations of `entry` for one category
///
/// # Examples
///
/// ```
/// use goexp::{AnnotationEntry, CrossReference, EvidenceVocabulary, OntologyCategory};
/// use goexp::evidence::{classify, ClassifyMode, EvidenceFilter};
///
/// let entry = AnnotationEntry::new(["P1"], "M")
///     .with_cross_reference(CrossReference::go("G:0001", "P", "IEA:x"))
///     .with_cross_reference(CrossReference::go("G:0002", "P", "EXP:y"));
/// let vocabulary: EvidenceVocabulary = ["EXP"].into_iter().collect();
///
/// let result = classify(
///     &entry,
///     OntologyCategory::Bpo,
///     EvidenceFilter::Codes(&vocabulary),
///     ClassifyMode::CollectAll,
/// );
/// assert_eq!(result.into_terms().unwrap().join(","), "G:0002");
/// ```
pub fn classify<R: Record + ?Sized>(
    entry: &R,
    category: OntologyCategory,
    filter: EvidenceFilter<'_>,
    mode: ClassifyMode,
) -> Classification {
    match mode {
        ClassifyMode::Exists => Classification::Exists(has_evidence(entry, category, filter)),
        ClassifyMode::CollectAll => Classification::Terms(collect_terms(entry, category, filter)),
    }
}

/// Returns `true` as soon as one cross reference of `category` passes `filter`
pub fn has_evidence<R: Record + ?Sized>(
    entry: &R,
    category: OntologyCategory,
    filter: EvidenceFilter<'_>,
) -> bool {
    matching(entry, category, filter).next().is_some()
}

/// Collects the terms of all cross references of `category` that pass `filter`
pub fn collect_terms<R: Record + ?Sized>(
    entry: &R,
    category: OntologyCategory,
    filter: EvidenceFilter<'_>,
) -> TermGroup {
    matching(entry, category, filter)
        .map(CrossReference::term_id)
        .collect()
}

/// Returns `true` if `entry` has any GO annotation in `category`
pub fn has_category<R: Record + ?Sized>(entry: &R, category: OntologyCategory) -> bool {
    has_evidence(entry, category, EvidenceFilter::Any)
}

/// Returns `true` if `entry` has an experimental GO annotation in `category`
pub fn has_experimental<R: Record + ?Sized>(
    entry: &R,
    category: OntologyCategory,
    vocabulary: &EvidenceVocabulary,
) -> bool {
    has_evidence(entry, category, EvidenceFilter::Codes(vocabulary))
}

/// The experimentally supported terms of `entry` in `category`
pub fn experimental_terms<R: Record + ?Sized>(
    entry: &R,
    category: OntologyCategory,
    vocabulary: &EvidenceVocabulary,
) -> TermGroup {
    collect_terms(entry, category, EvidenceFilter::Codes(vocabulary))
}

/// Records in which categories an entry has experimental evidence
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFlags {
    flags: [bool; 3],
}

impl CategoryFlags {
    /// Returns `true` if `category` is flagged
    pub fn contains(&self, category: OntologyCategory) -> bool {
        self.flags[category.index()]
    }

    /// Flags `category`
    pub fn insert(&mut self, category: OntologyCategory) {
        self.flags[category.index()] = true;
    }

    /// Returns `true` once all three categories are flagged
    pub fn is_complete(&self) -> bool {
        self.flags.iter().all(|flag| *flag)
    }

    /// Returns `true` if no category is flagged
    pub fn is_empty(&self) -> bool {
        !self.flags.iter().any(|flag| *flag)
    }
}

/// Checks all three categories for experimental evidence in a single scan
///
/// The scan of the cross references stops as soon as every category
/// has at least one experimental annotation.
pub fn experimental_categories<R: Record + ?Sized>(
    entry: &R,
    vocabulary: &EvidenceVocabulary,
) -> CategoryFlags {
    let mut flags = CategoryFlags::default();
    for xref in entry.cross_references() {
        if !xref.is_go() || !vocabulary.contains(xref.evidence_code()) {
            continue;
        }
        if let Some(category) = xref.category() {
            flags.insert(category);
        }
        if flags.is_complete() {
            break;
        }
    }
    flags
}

/// One [`TermGroup`] per ontology category
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermsByCategory {
    terms: [TermGroup; 3],
}

impl TermsByCategory {
    /// The terms of `category`
    pub fn get(&self, category: OntologyCategory) -> &TermGroup {
        &self.terms[category.index()]
    }

    /// Moves the terms of `category` out, leaving an empty group
    pub fn take(&mut self, category: OntologyCategory) -> TermGroup {
        std::mem::take(&mut self.terms[category.index()])
    }

    fn insert(&mut self, category: OntologyCategory, term_id: &str) {
        self.terms[category.index()].insert(term_id);
    }
}

/// Collects the experimental terms of all three categories in a single scan
pub fn experimental_terms_by_category<R: Record + ?Sized>(
    entry: &R,
    vocabulary: &EvidenceVocabulary,
) -> TermsByCategory {
    let mut terms = TermsByCategory::default();
    for xref in entry.cross_references() {
        if !xref.is_go() || !vocabulary.contains(xref.evidence_code()) {
            continue;
        }
        if let Some(category) = xref.category() {
            terms.insert(category, xref.term_id());
        }
    }
    terms
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::AnnotationEntry;

    fn vocabulary() -> EvidenceVocabulary {
        ["EXP", "IDA"].into_iter().collect()
    }

    fn entry() -> AnnotationEntry {
        AnnotationEntry::new(["P1"], "MKV")
            .with_cross_reference(CrossReference::new("InterPro", "G:9999", "P", "EXP:x"))
            .with_cross_reference(CrossReference::go("G:0001", "P", "IEA:InterPro"))
            .with_cross_reference(CrossReference::go("G:0002", "P:process", "EXP:PubMed"))
            .with_cross_reference(CrossReference::go("G:0003", "F", "IDA:SGD"))
            .with_cross_reference(CrossReference::go("G:0004", "P", "IDA:SGD"))
            .with_cross_reference(CrossReference::go("G:0002", "P", "IDA:SGD"))
            .with_cross_reference(CrossReference::go("G:0005", "C", "IEA:x"))
    }

    #[test]
    fn exists_finds_experimental() {
        let v = vocabulary();
        assert!(has_experimental(&entry(), OntologyCategory::Bpo, &v));
        assert!(has_experimental(&entry(), OntologyCategory::Mfo, &v));
        assert!(!has_experimental(&entry(), OntologyCategory::Cco, &v));
    }

    #[test]
    fn collect_all_has_no_duplicates() {
        let terms = experimental_terms(&entry(), OntologyCategory::Bpo, &vocabulary());
        assert_eq!(terms.join(","), "G:0002,G:0004");
    }

    #[test]
    fn non_go_references_are_ignored() {
        let v = vocabulary();
        let terms = experimental_terms(&entry(), OntologyCategory::Bpo, &v);
        assert!(!terms.contains("G:9999"));
    }

    #[test]
    fn category_exists_ignores_codes() {
        assert!(has_category(&entry(), OntologyCategory::Cco));
        let bare = AnnotationEntry::new(["P2"], "M");
        assert!(!has_category(&bare, OntologyCategory::Cco));
    }

    #[test]
    fn empty_vocabulary_matches_nothing() {
        let v = EvidenceVocabulary::new();
        for category in OntologyCategory::ALL {
            assert!(!has_experimental(&entry(), category, &v));
            assert!(experimental_terms(&entry(), category, &v).is_empty());
        }
    }

    #[test]
    fn modes_are_consistent() {
        let vocabularies = [
            EvidenceVocabulary::new(),
            vocabulary(),
            ["IEA"].into_iter().collect(),
            EvidenceVocabulary::experimental(),
        ];
        for v in &vocabularies {
            for category in OntologyCategory::ALL {
                let exists = classify(
                    &entry(),
                    category,
                    EvidenceFilter::Codes(v),
                    ClassifyMode::Exists,
                );
                let all = classify(
                    &entry(),
                    category,
                    EvidenceFilter::Codes(v),
                    ClassifyMode::CollectAll,
                );
                assert_eq!(exists.is_match(), all.is_match());
            }
        }
    }

    #[test]
    fn exists_has_no_terms() {
        let result = classify(
            &entry(),
            OntologyCategory::Bpo,
            EvidenceFilter::Any,
            ClassifyMode::Exists,
        );
        assert_eq!(result, Classification::Exists(true));
        assert!(result.into_terms().is_none());
    }

    #[test]
    fn unknown_aspect_is_ignored() {
        let entry = AnnotationEntry::new(["P1"], "M")
            .with_cross_reference(CrossReference::go("G:1", "X", "EXP:x"));
        for category in OntologyCategory::ALL {
            assert!(!has_category(&entry, category));
        }
    }

    #[test]
    fn all_categories_in_one_scan() {
        let flags = experimental_categories(&entry(), &vocabulary());
        assert!(flags.contains(OntologyCategory::Bpo));
        assert!(flags.contains(OntologyCategory::Mfo));
        assert!(!flags.contains(OntologyCategory::Cco));
        assert!(!flags.is_complete());

        let none = experimental_categories(&entry(), &EvidenceVocabulary::new());
        assert!(none.is_empty());
    }

    #[test]
    fn flags_complete() {
        let entry = AnnotationEntry::new(["P1"], "M")
            .with_cross_reference(CrossReference::go("G:1", "F", "EXP:x"))
            .with_cross_reference(CrossReference::go("G:2", "P", "EXP:x"))
            .with_cross_reference(CrossReference::go("G:3", "C", "EXP:x"))
            .with_cross_reference(CrossReference::go("G:4", "C", "EXP:x"));
        assert!(experimental_categories(&entry, &vocabulary()).is_complete());
    }

    #[test]
    fn terms_by_category_match_single_category() {
        let v = vocabulary();
        let mut by_category = experimental_terms_by_category(&entry(), &v);
        for category in OntologyCategory::ALL {
            assert_eq!(
                by_category.get(category),
                &experimental_terms(&entry(), category, &v)
            );
        }
        let bpo = by_category.take(OntologyCategory::Bpo);
        assert_eq!(bpo.len(), 2);
        assert!(by_category.get(OntologyCategory::Bpo).is_empty());
    }

    #[test]
    fn parse_vocabulary() {
        let v: EvidenceVocabulary = "EXP,IDA , ,IPI".parse().unwrap();
        assert_eq!(v.sorted_codes(), vec!["EXP", "IDA", "IPI"]);

        let empty: EvidenceVocabulary = "".parse().unwrap();
        assert!(empty.is_empty());

        assert!("EXP:x".parse::<EvidenceVocabulary>().is_err());
        assert!("E XP".parse::<EvidenceVocabulary>().is_err());
    }

    #[test]
    fn default_experimental_codes() {
        let v = EvidenceVocabulary::experimental();
        assert_eq!(v.len(), EXPERIMENTAL_CODES.len());
        assert!(!v.contains("IEA"));
    }
}
