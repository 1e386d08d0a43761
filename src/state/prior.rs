use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::term::TermGroup;

/// The known terms of one (target, accession) pair of a prior mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorEntry {
    target_id: String,
    accession: String,
    terms: TermGroup,
}

impl PriorEntry {
    fn new(target_id: &str, accession: &str) -> Self {
        Self {
            target_id: target_id.to_string(),
            accession: accession.to_string(),
            terms: TermGroup::default(),
        }
    }

    /// The target id of the earlier run
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// The protein accession
    pub fn accession(&self) -> &str {
        &self.accession
    }

    /// All terms known for the pair
    pub fn terms(&self) -> &TermGroup {
        &self.terms
    }

    /// The lookup key `target_id:accession`
    pub fn key(&self) -> String {
        key(&self.target_id, &self.accession)
    }
}

fn key(target_id: &str, accession: &str) -> String {
    format!("{target_id}:{accession}")
}

/// Previously known terms, keyed by `target_id:accession`
///
/// Rows with the same key accumulate their terms.
///
/// When a t2 record matches several keys, the key that sorts first
/// (plain byte-wise string order of `target_id:accession`) wins. This
/// makes the choice independent of the order of the mapping file.
///
/// # Examples
///
/// ```
/// use goexp::state::PriorTermMap;
///
/// let mut prior = PriorTermMap::new();
/// prior.insert("T1", "ACC1", "G:0010");
/// prior.insert("T1", "ACC1", "G:0012");
///
/// let accessions = vec![String::from("X9"), String::from("acc1")];
/// let entry = prior.find(&accessions).unwrap();
/// assert_eq!(entry.key(), "T1:ACC1");
/// assert_eq!(entry.terms().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PriorTermMap {
    entries: BTreeMap<String, PriorEntry>,
    by_accession: HashMap<String, Vec<String>>,
}

impl PriorTermMap {
    /// Constructs an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `term_id` to the terms of `target_id:accession`
    pub fn insert(&mut self, target_id: &str, accession: &str, term_id: &str) {
        let key = key(target_id, accession);
        let entry = match self.entries.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.by_accession
                    .entry(accession.to_ascii_uppercase())
                    .or_default()
                    .push(entry.key().clone());
                entry.insert(PriorEntry::new(target_id, accession))
            }
        };
        entry.terms.insert(term_id);
    }

    /// Returns the entry stored under `key`
    pub fn get(&self, key: &str) -> Option<&PriorEntry> {
        self.entries.get(key)
    }

    /// Finds the entry whose accession matches any of `accessions`
    ///
    /// Accessions are compared case-insensitively. If several keys match,
    /// the smallest key is returned.
    pub fn find(&self, accessions: &[String]) -> Option<&PriorEntry> {
        accessions
            .iter()
            .filter_map(|acc| self.by_accession.get(&acc.to_ascii_uppercase()))
            .flatten()
            .min()
            .and_then(|key| self.entries.get(key))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of terms over all keys
    pub fn term_count(&self) -> usize {
        self.entries.values().map(|entry| entry.terms.len()).sum()
    }

    /// Iterates all entries in key order
    pub fn iter(&self) -> impl Iterator<Item = &PriorEntry> {
        self.entries.values()
    }
}
