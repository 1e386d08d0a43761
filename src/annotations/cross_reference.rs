use crate::term::OntologyCategory;
use crate::GO_DATABASE;

/// A single database cross reference of a record
///
/// For `GO` cross references the fields hold:
///
/// | Field | Example | Description |
/// | --- | --- | --- |
/// | `database` | `GO` | Name of the referenced database |
/// | `term_id` | `GO:0005737` | The GO term |
/// | `aspect` | `C:cytoplasm` | Aspect symbol, optionally followed by the term name |
/// | `evidence` | `IDA:UniProtKB` | Evidence code and the source of the annotation |
///
/// # Examples
///
/// ```
/// use goexp::{CrossReference, OntologyCategory};
///
/// let xref = CrossReference::go("GO:0005737", "C:cytoplasm", "IDA:UniProtKB");
/// assert!(xref.is_go());
/// assert_eq!(xref.evidence_code(), "IDA");
/// assert_eq!(xref.category(), Some(OntologyCategory::Cco));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReference {
    database: String,
    term_id: String,
    aspect: String,
    evidence: String,
}

impl CrossReference {
    /// Constructs a cross reference to any database
    pub fn new(database: &str, term_id: &str, aspect: &str, evidence: &str) -> Self {
        Self {
            database: database.to_string(),
            term_id: term_id.to_string(),
            aspect: aspect.to_string(),
            evidence: evidence.to_string(),
        }
    }

    /// Constructs a `GO` cross reference
    pub fn go(term_id: &str, aspect: &str, evidence: &str) -> Self {
        Self::new(GO_DATABASE, term_id, aspect, evidence)
    }

    /// The referenced database, e.g. `GO`
    pub fn database(&self) -> &str {
        &self.database
    }

    /// The id of the referenced term
    pub fn term_id(&self) -> &str {
        &self.term_id
    }

    /// The raw aspect field
    pub fn aspect(&self) -> &str {
        &self.aspect
    }

    /// The raw evidence descriptor, e.g. `IDA:UniProtKB`
    pub fn evidence(&self) -> &str {
        &self.evidence
    }

    /// Returns `true` for cross references to the Gene Ontology
    pub fn is_go(&self) -> bool {
        self.database == GO_DATABASE
    }

    /// The evidence code, i.e. everything before the first `:` of the descriptor
    pub fn evidence_code(&self) -> &str {
        match self.evidence.split_once(':') {
            Some((code, _)) => code,
            None => &self.evidence,
        }
    }

    /// The ontology category of the aspect field
    ///
    /// `None` if the aspect is not one of `F`, `P` or `C`
    pub fn category(&self) -> Option<OntologyCategory> {
        OntologyCategory::from_aspect(&self.aspect)
    }
}
