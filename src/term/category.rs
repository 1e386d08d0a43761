use std::fmt::Display;
use std::str::FromStr;

use crate::GoExpError;
use crate::GoExpResult;

/// One of the three independent GO classification axes
///
/// Each category corresponds to exactly one aspect symbol used in the
/// `GO` cross references of UniProtKB records:
///
/// | Category | Symbol | Aspect |
/// | --- | --- | --- |
/// | [`OntologyCategory::Mfo`] | `F` | Molecular function |
/// | [`OntologyCategory::Bpo`] | `P` | Biological process |
/// | [`OntologyCategory::Cco`] | `C` | Cellular component |
///
/// # Examples
///
/// ```
/// use goexp::OntologyCategory;
///
/// let category = OntologyCategory::try_from('P').unwrap();
/// assert_eq!(category, OntologyCategory::Bpo);
/// assert_eq!(category.symbol(), 'P');
/// assert_eq!(category.to_string(), "BPO");
///
/// assert!(OntologyCategory::try_from('X').is_err());
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum OntologyCategory {
    /// Molecular function ontology
    Mfo,
    /// Biological process ontology
    Bpo,
    /// Cellular component ontology
    Cco,
}

impl OntologyCategory {
    /// All categories in the order the output passes are run
    pub const ALL: [OntologyCategory; 3] = [
        OntologyCategory::Mfo,
        OntologyCategory::Bpo,
        OntologyCategory::Cco,
    ];

    /// The aspect symbol used in GO cross references
    pub fn symbol(&self) -> char {
        match self {
            OntologyCategory::Mfo => 'F',
            OntologyCategory::Bpo => 'P',
            OntologyCategory::Cco => 'C',
        }
    }

    /// The abbreviated name, e.g. `MFO`
    pub fn name(&self) -> &'static str {
        match self {
            OntologyCategory::Mfo => "MFO",
            OntologyCategory::Bpo => "BPO",
            OntologyCategory::Cco => "CCO",
        }
    }

    /// Position of the category in [`OntologyCategory::ALL`]
    pub fn index(&self) -> usize {
        match self {
            OntologyCategory::Mfo => 0,
            OntologyCategory::Bpo => 1,
            OntologyCategory::Cco => 2,
        }
    }

    /// Maps the aspect field of a cross reference to a category
    ///
    /// Only the first character is inspected and compared case-insensitively,
    /// so both `P` and `P:cell cycle` map to [`OntologyCategory::Bpo`].
    /// Returns `None` for any other aspect.
    pub fn from_aspect(aspect: &str) -> Option<Self> {
        aspect
            .chars()
            .next()
            .and_then(|symbol| OntologyCategory::try_from(symbol).ok())
    }
}

impl TryFrom<char> for OntologyCategory {
    type Error = GoExpError;
    fn try_from(symbol: char) -> GoExpResult<Self> {
        match symbol.to_ascii_uppercase() {
            'F' => Ok(OntologyCategory::Mfo),
            'P' => Ok(OntologyCategory::Bpo),
            'C' => Ok(OntologyCategory::Cco),
            _ => Err(GoExpError::UnknownCategory(symbol.to_string())),
        }
    }
}

impl FromStr for OntologyCategory {
    type Err = GoExpError;

    /// Parses either a single aspect symbol or an abbreviated category name
    fn from_str(s: &str) -> GoExpResult<Self> {
        let value = s.trim();
        let mut chars = value.chars();
        if let (Some(symbol), None) = (chars.next(), chars.next()) {
            return OntologyCategory::try_from(symbol);
        }
        match value.to_ascii_uppercase().as_str() {
            "MFO" => Ok(OntologyCategory::Mfo),
            "BPO" => Ok(OntologyCategory::Bpo),
            "CCO" => Ok(OntologyCategory::Cco),
            _ => Err(GoExpError::UnknownCategory(s.to_string())),
        }
    }
}

impl Display for OntologyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn symbols_are_bijective() {
        for category in OntologyCategory::ALL {
            assert_eq!(
                OntologyCategory::try_from(category.symbol()).unwrap(),
                category
            );
        }
    }

    #[test]
    fn lowercase_symbols() {
        assert_eq!(
            OntologyCategory::try_from('f').unwrap(),
            OntologyCategory::Mfo
        );
        assert_eq!(
            OntologyCategory::try_from('c').unwrap(),
            OntologyCategory::Cco
        );
    }

    #[test]
    fn unknown_symbol_fails() {
        let err = OntologyCategory::try_from('X').unwrap_err();
        assert!(matches!(err, GoExpError::UnknownCategory(s) if s == "X"));
    }

    #[test]
    fn parse_names_and_symbols() {
        assert_eq!(
            "bpo".parse::<OntologyCategory>().unwrap(),
            OntologyCategory::Bpo
        );
        assert_eq!(
            " C ".parse::<OntologyCategory>().unwrap(),
            OntologyCategory::Cco
        );
        assert!("MF".parse::<OntologyCategory>().is_err());
        assert!("".parse::<OntologyCategory>().is_err());
    }

    #[test]
    fn aspect_mapping() {
        assert_eq!(
            OntologyCategory::from_aspect("P:cell cycle"),
            Some(OntologyCategory::Bpo)
        );
        assert_eq!(
            OntologyCategory::from_aspect("F"),
            Some(OntologyCategory::Mfo)
        );
        assert_eq!(OntologyCategory::from_aspect(""), None);
        assert_eq!(OntologyCategory::from_aspect("Z:zzz"), None);
    }

    #[test]
    fn index_matches_all_order() {
        for (idx, category) in OntologyCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), idx);
        }
    }
}
