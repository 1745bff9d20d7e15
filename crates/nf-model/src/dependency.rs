//! Functional and multi-valued dependencies.
//!
//! The textual forms are `"A, B -> C"` for a functional dependency and
//! `"A, B ->> C"` for a multi-valued dependency. Both sides are
//! comma-separated attribute lists and must be non-empty.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeSet;
use crate::error::{NormalizeError, Result};
use crate::relation::Relation;

const FD_ARROW: &str = "->";
const MVD_ARROW: &str = "->>";

/// `determinant -> dependent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FunctionalDependency {
    determinant: AttributeSet,
    dependent: AttributeSet,
}

impl FunctionalDependency {
    pub fn new(determinant: AttributeSet, dependent: AttributeSet) -> Result<Self> {
        check_sides(&determinant, &dependent)?;
        Ok(Self {
            determinant,
            dependent,
        })
    }

    pub fn determinant(&self) -> &AttributeSet {
        &self.determinant
    }

    pub fn dependent(&self) -> &AttributeSet {
        &self.dependent
    }

    /// Both sides together, determinant first.
    pub fn attributes(&self) -> AttributeSet {
        self.determinant.union(&self.dependent)
    }

    /// True when the dependent is contained in the determinant.
    pub fn is_trivial(&self) -> bool {
        self.dependent.is_subset(&self.determinant)
    }

    /// One dependency per dependent attribute (decomposition rule).
    pub fn split(&self) -> Vec<FunctionalDependency> {
        self.dependent
            .iter()
            .map(|attribute| FunctionalDependency {
                determinant: self.determinant.clone(),
                dependent: AttributeSet::from_iter([attribute]),
            })
            .collect()
    }
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {FD_ARROW} {}", self.determinant, self.dependent)
    }
}

impl FromStr for FunctionalDependency {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self> {
        if s.contains(MVD_ARROW) {
            return Err(NormalizeError::syntax(
                s,
                "multi-valued arrow '->>' in a functional dependency",
            ));
        }
        let (determinant, dependent) = split_declaration(s, FD_ARROW)?;
        Self::new(determinant, dependent)
    }
}

impl TryFrom<String> for FunctionalDependency {
    type Error = NormalizeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FunctionalDependency> for String {
    fn from(fd: FunctionalDependency) -> Self {
        fd.to_string()
    }
}

/// `determinant ->> dependent`.
///
/// The complement (every other attribute) is implicitly multi-determined by
/// the same determinant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MultiValuedDependency {
    determinant: AttributeSet,
    dependent: AttributeSet,
}

impl MultiValuedDependency {
    pub fn new(determinant: AttributeSet, dependent: AttributeSet) -> Result<Self> {
        check_sides(&determinant, &dependent)?;
        Ok(Self {
            determinant,
            dependent,
        })
    }

    pub fn determinant(&self) -> &AttributeSet {
        &self.determinant
    }

    pub fn dependent(&self) -> &AttributeSet {
        &self.dependent
    }

    pub fn attributes(&self) -> AttributeSet {
        self.determinant.union(&self.dependent)
    }

    /// `attributes - determinant - dependent`.
    pub fn complement(&self, attributes: &AttributeSet) -> AttributeSet {
        attributes.difference(&self.attributes())
    }

    /// Restricts the dependency to `attributes`.
    ///
    /// Returns `None` when the determinant is not fully present or the
    /// restricted dependency is trivial (empty dependent, or determinant and
    /// dependent already cover every attribute).
    pub fn restrict(&self, attributes: &AttributeSet) -> Option<MultiValuedDependency> {
        if !self.determinant.is_subset(attributes) {
            return None;
        }
        let dependent = self
            .dependent
            .intersection(attributes)
            .difference(&self.determinant);
        if dependent.is_empty() || self.determinant.union(&dependent) == *attributes {
            return None;
        }
        Some(MultiValuedDependency {
            determinant: self.determinant.clone(),
            dependent,
        })
    }
}

impl fmt::Display for MultiValuedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {MVD_ARROW} {}", self.determinant, self.dependent)
    }
}

impl FromStr for MultiValuedDependency {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self> {
        if !s.contains(MVD_ARROW) {
            return Err(NormalizeError::syntax(s, "missing '->>' separator"));
        }
        let (determinant, dependent) = split_declaration(s, MVD_ARROW)?;
        Self::new(determinant, dependent)
    }
}

impl TryFrom<String> for MultiValuedDependency {
    type Error = NormalizeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MultiValuedDependency> for String {
    fn from(mvd: MultiValuedDependency) -> Self {
        mvd.to_string()
    }
}

/// The dependency sets supplied with one normalization request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    pub fds: Vec<FunctionalDependency>,
    pub mvds: Vec<MultiValuedDependency>,
}

impl Dependencies {
    pub fn new(fds: Vec<FunctionalDependency>, mvds: Vec<MultiValuedDependency>) -> Self {
        Self { fds, mvds }
    }

    /// Parses every declaration up front; the first malformed one is returned
    /// as an error and nothing else is kept.
    pub fn parse<F, M>(fd_lines: F, mvd_lines: M) -> Result<Self>
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        M: IntoIterator,
        M::Item: AsRef<str>,
    {
        let fds = fd_lines
            .into_iter()
            .map(|line| line.as_ref().parse())
            .collect::<Result<Vec<_>>>()?;
        let mvds = mvd_lines
            .into_iter()
            .map(|line| line.as_ref().parse())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fds, mvds })
    }

    /// Checks that every referenced attribute exists in `relation`.
    pub fn validate_against(&self, relation: &Relation) -> Result<()> {
        let fds = self.fds.iter().map(|fd| (fd.attributes(), fd.to_string()));
        let mvds = self.mvds.iter().map(|mvd| (mvd.attributes(), mvd.to_string()));
        for (attributes, text) in fds.chain(mvds) {
            if let Some(missing) = attributes
                .iter()
                .find(|attribute| !relation.attributes().contains(attribute))
            {
                return Err(NormalizeError::UnknownAttribute {
                    attribute: missing.to_string(),
                    dependency: text,
                    relation: relation.name().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.fds.is_empty() && self.mvds.is_empty()
    }
}

fn check_sides(determinant: &AttributeSet, dependent: &AttributeSet) -> Result<()> {
    if determinant.is_empty() {
        return Err(NormalizeError::EmptyDeterminant {
            dependent: dependent.to_string(),
        });
    }
    if dependent.is_empty() {
        return Err(NormalizeError::EmptyDependent {
            determinant: determinant.to_string(),
        });
    }
    Ok(())
}

fn split_declaration(input: &str, arrow: &str) -> Result<(AttributeSet, AttributeSet)> {
    let mut parts = input.split(arrow);
    let (Some(left), Some(right)) = (parts.next(), parts.next()) else {
        return Err(NormalizeError::syntax(
            input,
            format!("missing '{arrow}' separator"),
        ));
    };
    if parts.next().is_some() {
        return Err(NormalizeError::syntax(
            input,
            format!("more than one '{arrow}' separator"),
        ));
    }
    let determinant = parse_side(input, left, "determinant")?;
    let dependent = parse_side(input, right, "dependent")?;
    Ok((determinant, dependent))
}

fn parse_side(input: &str, side: &str, label: &str) -> Result<AttributeSet> {
    if side.trim().is_empty() {
        return Err(NormalizeError::syntax(input, format!("empty {label}")));
    }
    let mut attributes = AttributeSet::new();
    for name in side.split(',') {
        let name = name.trim();
        if name.is_empty() {
            return Err(NormalizeError::syntax(
                input,
                format!("empty attribute name in {label}"),
            ));
        }
        attributes.insert(name);
    }
    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    #[test]
    fn parses_composite_determinant() {
        let fd: FunctionalDependency = "A, B -> C, D".parse().unwrap();
        assert_eq!(fd.determinant(), &attrs!["A", "B"]);
        assert_eq!(fd.dependent(), &attrs!["C", "D"]);
        assert_eq!(fd.to_string(), "A, B -> C, D");
    }

    #[test]
    fn parses_without_spaces() {
        let fd: FunctionalDependency = "A->B".parse().unwrap();
        assert_eq!(fd.determinant(), &attrs!["A"]);
        assert_eq!(fd.dependent(), &attrs!["B"]);
    }

    #[test]
    fn rejects_empty_dependent_text() {
        let err = "A->".parse::<FunctionalDependency>().unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDependencySyntax { .. }));
    }

    #[test]
    fn rejects_missing_separator() {
        let err = "A B".parse::<FunctionalDependency>().unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDependencySyntax { .. }));
    }

    #[test]
    fn rejects_mvd_arrow_in_fd() {
        let err = "A ->> B".parse::<FunctionalDependency>().unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDependencySyntax { .. }));
    }

    #[test]
    fn rejects_blank_attribute_between_commas() {
        let err = "A,,B -> C".parse::<FunctionalDependency>().unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDependencySyntax { .. }));
    }

    #[test]
    fn constructor_rejects_empty_sides() {
        let err = FunctionalDependency::new(AttributeSet::new(), attrs!["B"]).unwrap_err();
        assert!(matches!(err, NormalizeError::EmptyDeterminant { .. }));
        let err = MultiValuedDependency::new(attrs!["A"], AttributeSet::new()).unwrap_err();
        assert!(matches!(err, NormalizeError::EmptyDependent { .. }));
    }

    #[test]
    fn split_yields_one_fd_per_dependent() {
        let fd: FunctionalDependency = "A -> B, C".parse().unwrap();
        let parts: Vec<String> = fd.split().iter().map(ToString::to_string).collect();
        assert_eq!(parts, vec!["A -> B", "A -> C"]);
    }

    #[test]
    fn mvd_complement_and_restrict() {
        let mvd: MultiValuedDependency = "A ->> B".parse().unwrap();
        let all = attrs!["A", "B", "C"];
        assert_eq!(mvd.complement(&all), attrs!["C"]);
        assert!(mvd.restrict(&all).is_some());
        assert!(mvd.restrict(&attrs!["A", "B"]).is_none());
        assert!(mvd.restrict(&attrs!["B", "C"]).is_none());
    }

    #[test]
    fn mvd_requires_double_arrow() {
        let err = "A -> B".parse::<MultiValuedDependency>().unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDependencySyntax { .. }));
    }

    #[test]
    fn parse_stops_at_first_malformed_line() {
        let err = Dependencies::parse(["A -> B", "B ->", "C -> D"], Vec::<&str>::new())
            .unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidDependencySyntax { .. }));
    }

    #[test]
    fn fd_serializes_as_text() {
        let fd: FunctionalDependency = "A -> B".parse().unwrap();
        assert_eq!(serde_json::to_string(&fd).unwrap(), r#""A -> B""#);
        let back: FunctionalDependency = serde_json::from_str(r#""A -> B""#).unwrap();
        assert_eq!(back, fd);
    }
}
