use std::fmt::Display;
use std::ops::{BitOr, Sub};

use smallvec::SmallVec;

use crate::DEFAULT_NUM_TERMS;

/// A set of GO term ids
///
/// Each term can occur only once in the group. The terms are kept sorted,
/// so iterating a group always yields the same order regardless of the
/// order in which the terms were inserted. Output files built from groups
/// are therefore byte-identical across reruns.
///
/// # Examples
///
/// ```
/// use goexp::TermGroup;
///
/// let mut group = TermGroup::new();
/// assert!(group.insert("GO:0000002"));
/// assert!(group.insert("GO:0000001"));
/// assert!(!group.insert("GO:0000002"));
///
/// assert_eq!(group.len(), 2);
/// assert_eq!(group.join(","), "GO:0000001,GO:0000002");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct TermGroup {
    ids: SmallVec<[String; DEFAULT_NUM_TERMS]>,
}

impl TermGroup {
    /// Constructs a new, empty [`TermGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`TermGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no terms
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of terms in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a term to the group
    ///
    /// Returns whether the term was newly inserted. That is:
    ///
    /// - If the group did not previously contain this term, true is returned.
    /// - If the group already contained this term, false is returned.
    pub fn insert<S: AsRef<str> + Into<String>>(&mut self, id: S) -> bool {
        match self
            .ids
            .binary_search_by(|probe| probe.as_str().cmp(id.as_ref()))
        {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id.into());
                true
            }
        }
    }

    /// Appends a term without checking order or uniqueness
    ///
    /// Only used when copying from another (sorted) group
    fn insert_unchecked(&mut self, id: String) {
        self.ids.push(id);
    }

    /// Returns `true` if the group contains the term
    pub fn contains(&self, id: &str) -> bool {
        self.ids
            .binary_search_by(|probe| probe.as_str().cmp(id))
            .is_ok()
    }

    /// Returns an Iterator of the terms inside the group
    pub fn iter(&self) -> TermIds<'_> {
        TermIds::new(self.ids.iter())
    }

    /// Returns all terms joined by `separator`, in sorted order
    pub fn join(&self, separator: &str) -> String {
        self.ids.join(separator)
    }
}

impl<S: AsRef<str> + Into<String>> FromIterator<S> for TermGroup {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut group = TermGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl<S: AsRef<str> + Into<String>> Extend<S> for TermGroup {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl<'a> IntoIterator for &'a TermGroup {
    type Item = &'a str;
    type IntoIter = TermIds<'a>;

    fn into_iter(self) -> TermIds<'a> {
        self.iter()
    }
}

/// An iterator over the term ids of a [`TermGroup`]
pub struct TermIds<'a> {
    inner: std::slice::Iter<'a, String>,
}

impl<'a> TermIds<'a> {
    fn new(inner: std::slice::Iter<'a, String>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for TermIds<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(String::as_str)
    }
}

impl BitOr for &TermGroup {
    type Output = TermGroup;

    fn bitor(self, rhs: &TermGroup) -> TermGroup {
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        let mut group = TermGroup::with_capacity(self.len() + rhs.len());
        for id in &large.ids {
            group.insert_unchecked(id.clone());
        }
        for id in &small.ids {
            group.insert(id.as_str());
        }
        group
    }
}

impl Sub for &TermGroup {
    type Output = TermGroup;

    /// Terms of `self` that are not part of `rhs`
    fn sub(self, rhs: &TermGroup) -> TermGroup {
        let mut group = TermGroup::with_capacity(self.len());
        for id in &self.ids {
            if !rhs.contains(id) {
                group.insert_unchecked(id.clone());
            }
        }
        group
    }
}

impl Display for TermGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.join(","))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn insert_keeps_order() {
        let mut group = TermGroup::new();
        group.insert("GO:0000003");
        group.insert("GO:0000001");
        group.insert("GO:0000002");
        group.insert("GO:0000001");

        let ids: Vec<&str> = group.iter().collect();
        assert_eq!(ids, vec!["GO:0000001", "GO:0000002", "GO:0000003"]);
    }

    #[test]
    fn contains() {
        let group: TermGroup = ["G:0001", "G:0002"].into_iter().collect();
        assert!(group.contains("G:0001"));
        assert!(!group.contains("G:0003"));
        assert!(!TermGroup::new().contains("G:0001"));
    }

    #[test]
    fn union() {
        let a: TermGroup = ["G:1", "G:3"].into_iter().collect();
        let b: TermGroup = ["G:2", "G:3", "G:4"].into_iter().collect();

        let c = &a | &b;
        assert_eq!(c.join(","), "G:1,G:2,G:3,G:4");
        assert_eq!(&b | &a, c);
    }

    #[test]
    fn difference() {
        let t2: TermGroup = ["G:0010", "G:0011"].into_iter().collect();
        let t1: TermGroup = ["G:0010"].into_iter().collect();

        let gained = &t2 - &t1;
        assert_eq!(gained.len(), 1);
        assert!(gained.contains("G:0011"));

        assert!((&t1 - &t2).is_empty());
        assert_eq!(&t2 - &TermGroup::new(), t2);
    }

    #[test]
    fn display_joins_with_comma() {
        let group: TermGroup = ["G:2", "G:1"].into_iter().collect();
        assert_eq!(group.to_string(), "G:1,G:2");
        assert_eq!(TermGroup::new().to_string(), "");
    }

    #[test]
    fn extend_owned_strings() {
        let mut group = TermGroup::new();
        group.extend(vec![String::from("G:2"), String::from("G:1")]);
        group.extend(["G:2"]);
        assert_eq!(group.len(), 2);
    }
}
