//! Insertion-ordered attribute sets.
//!
//! Decomposed relations list their columns in the order the source relation
//! declared them, so the set keeps insertion order while comparing by
//! membership only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered set of unique attribute names.
///
/// Equality ignores order: `{A, B}` equals `{B, A}`.
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AttributeSet {
    items: Vec<String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds an attribute; returns false when it was already present.
    pub fn insert(&mut self, attribute: impl Into<String>) -> bool {
        let attribute = attribute.into();
        if self.contains(&attribute) {
            return false;
        }
        self.items.push(attribute);
        true
    }

    /// Adds every attribute of `other`; returns the number of new members.
    pub fn extend_from(&mut self, other: &AttributeSet) -> usize {
        other
            .iter()
            .filter(|attribute| self.insert(attribute.to_string()))
            .count()
    }

    pub fn remove(&mut self, attribute: &str) -> bool {
        match self.items.iter().position(|item| item == attribute) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.items.iter().any(|item| item == attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn is_subset(&self, other: &AttributeSet) -> bool {
        self.iter().all(|attribute| other.contains(attribute))
    }

    pub fn is_superset(&self, other: &AttributeSet) -> bool {
        other.is_subset(self)
    }

    pub fn is_proper_subset(&self, other: &AttributeSet) -> bool {
        self.len() < other.len() && self.is_subset(other)
    }

    pub fn is_disjoint(&self, other: &AttributeSet) -> bool {
        !self.iter().any(|attribute| other.contains(attribute))
    }

    /// Members of `self` followed by the new members of `other`.
    pub fn union(&self, other: &AttributeSet) -> AttributeSet {
        let mut result = self.clone();
        result.extend_from(other);
        result
    }

    /// Members of `self` that are also in `other`, in `self` order.
    pub fn intersection(&self, other: &AttributeSet) -> AttributeSet {
        self.iter()
            .filter(|attribute| other.contains(attribute))
            .collect()
    }

    /// Members of `self` that are not in `other`, in `self` order.
    pub fn difference(&self, other: &AttributeSet) -> AttributeSet {
        self.iter()
            .filter(|attribute| !other.contains(attribute))
            .collect()
    }

    /// Copy of the set ordered by name.
    pub fn sorted(&self) -> AttributeSet {
        let mut items = self.items.clone();
        items.sort();
        AttributeSet { items }
    }

    /// Copy of the set ordered by position in `order`; unknown members go last.
    pub fn ordered_by(&self, order: &AttributeSet) -> AttributeSet {
        let mut result: AttributeSet = order
            .iter()
            .filter(|attribute| self.contains(attribute))
            .collect();
        result.extend_from(self);
        result
    }

    pub fn first(&self) -> Option<&str> {
        self.items.first().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.clone()
    }
}

impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items.join(", "))
    }
}

impl From<Vec<String>> for AttributeSet {
    fn from(items: Vec<String>) -> Self {
        items.into_iter().collect()
    }
}

impl From<AttributeSet> for Vec<String> {
    fn from(set: AttributeSet) -> Self {
        set.items
    }
}

impl<S: Into<String>> FromIterator<S> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for attribute in iter {
            set.insert(attribute);
        }
        set
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Builds an [`AttributeSet`] from string literals.
///
/// ```
/// use nf_model::attrs;
///
/// let key = attrs!["A", "B"];
/// assert_eq!(key.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    ($($attribute:expr),* $(,)?) => {
        $crate::AttributeSet::from_iter([$($attribute),*])
    };
}
