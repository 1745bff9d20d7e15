//! Key analysis: superkeys, candidate keys, prime attributes, and the partial
//! and transitive dependencies that break 2NF and 3NF.
//!
//! Everything here is read-only; no function mutates the dependency set.

use serde::Serialize;
use tracing::{debug, warn};

use nf_model::{AttributeSet, FunctionalDependency, NormalizeError, Relation, Result};

use crate::closure::closure;

/// True iff the closure of `candidate` covers every attribute in `attributes`.
///
/// For a full relation this is `closure(candidate) == attributes`; for a
/// sub-relation the closure may also reach attributes outside it.
pub fn is_superkey(
    candidate: &AttributeSet,
    attributes: &AttributeSet,
    fds: &[FunctionalDependency],
) -> bool {
    closure(candidate, fds).is_superset(attributes)
}

/// A superkey none of whose proper subsets is a superkey.
pub fn is_candidate_key(
    candidate: &AttributeSet,
    attributes: &AttributeSet,
    fds: &[FunctionalDependency],
) -> bool {
    if !is_superkey(candidate, attributes, fds) {
        return false;
    }
    // Superkeys are upward closed, so dropping one attribute at a time suffices.
    candidate.iter().all(|attribute| {
        let mut reduced = candidate.clone();
        reduced.remove(attribute);
        !is_superkey(&reduced, attributes, fds)
    })
}

/// Union of all candidate key attributes.
pub fn prime_attributes(candidate_keys: &[AttributeSet]) -> AttributeSet {
    let mut prime = AttributeSet::new();
    for key in candidate_keys {
        prime.extend_from(key);
    }
    prime
}

/// Every candidate key of `attributes` under `fds`.
///
/// An attribute whose removal leaves a non-superkey belongs to every key;
/// attributes that never appear in a determinant belong to none. The rest
/// are enumerated by increasing subset size, skipping supersets of keys
/// already found, so keys come out shortest first and otherwise in
/// declaration order.
pub fn candidate_keys(
    attributes: &AttributeSet,
    fds: &[FunctionalDependency],
    search_limit: usize,
) -> Result<Vec<AttributeSet>> {
    let core: AttributeSet = attributes
        .iter()
        .filter(|attribute| {
            let mut rest = attributes.clone();
            rest.remove(attribute);
            !is_superkey(&rest, attributes, fds)
        })
        .collect();
    if is_superkey(&core, attributes, fds) {
        return Ok(vec![core]);
    }

    let searchable: Vec<&str> = attributes
        .iter()
        .filter(|attribute| !core.contains(attribute))
        .filter(|attribute| fds.iter().any(|fd| fd.determinant().contains(attribute)))
        .collect();
    if searchable.len() > search_limit {
        return Err(NormalizeError::KeySearchTooLarge {
            attributes: searchable.len(),
            limit: search_limit,
        });
    }
    debug!(
        core = %core,
        searchable = searchable.len(),
        "enumerating candidate keys"
    );

    let mut keys: Vec<AttributeSet> = Vec::new();
    for size in 1..=searchable.len() {
        for combination in Combinations::new(searchable.len(), size) {
            let mut candidate = core.clone();
            for index in combination {
                candidate.insert(searchable[index]);
            }
            if keys.iter().any(|key| key.is_subset(&candidate)) {
                continue;
            }
            if is_superkey(&candidate, attributes, fds) {
                keys.push(candidate.ordered_by(attributes));
            }
        }
    }
    Ok(keys)
}

/// A determinant that is a proper subset of a candidate key and still
/// determines non-prime attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialDependency {
    pub key: AttributeSet,
    pub dependency: FunctionalDependency,
}

/// All partial dependencies (2NF violations).
///
/// The reported dependency keeps only the non-prime part of the dependent.
pub fn partial_dependencies(
    fds: &[FunctionalDependency],
    candidate_keys: &[AttributeSet],
) -> Vec<PartialDependency> {
    let prime = prime_attributes(candidate_keys);
    let mut found = Vec::new();
    for fd in fds {
        let non_prime = fd.dependent().difference(&prime);
        if non_prime.is_empty() {
            continue;
        }
        let Some(key) = candidate_keys
            .iter()
            .find(|key| fd.determinant().is_proper_subset(key))
        else {
            continue;
        };
        if let Ok(dependency) = FunctionalDependency::new(fd.determinant().clone(), non_prime) {
            found.push(PartialDependency {
                key: key.clone(),
                dependency,
            });
        }
    }
    found
}

/// True iff some determinant is a proper subset of a candidate key while its
/// dependent contains a non-prime attribute.
pub fn partial_dependency_exists(
    fds: &[FunctionalDependency],
    candidate_keys: &[AttributeSet],
) -> bool {
    !partial_dependencies(fds, candidate_keys).is_empty()
}

/// A chain `key -> via -> dependent` in which `via` is not a superkey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitiveDependency {
    pub key: AttributeSet,
    pub via: AttributeSet,
    pub dependent: String,
}

/// All transitive dependencies (3NF violations beyond partial ones).
///
/// The dependency graph only uses dependencies whose determinant is not a
/// superkey, contains at least one non-prime attribute, and whose dependent
/// attribute is non-prime. Every such determinant is reached from a
/// candidate key, which gives the path of length two. A dependency whose
/// determinant is a key, or consists only of prime attributes, is direct
/// and never reported here.
pub fn transitive_dependencies(
    fds: &[FunctionalDependency],
    candidate_keys: &[AttributeSet],
    attributes: &AttributeSet,
) -> Vec<TransitiveDependency> {
    let prime = prime_attributes(candidate_keys);
    let key = candidate_keys
        .first()
        .cloned()
        .unwrap_or_else(|| attributes.clone());

    let mut found: Vec<TransitiveDependency> = Vec::new();
    for fd in fds.iter().flat_map(FunctionalDependency::split) {
        let via = fd.determinant();
        if !via.is_subset(attributes)
            || via.is_subset(&prime)
            || is_superkey(via, attributes, fds)
        {
            continue;
        }
        for dependent in fd.dependent().iter() {
            if prime.contains(dependent) || via.contains(dependent) {
                continue;
            }
            if !attributes.contains(dependent) {
                continue;
            }
            let chain = TransitiveDependency {
                key: key.clone(),
                via: via.clone(),
                dependent: dependent.to_string(),
            };
            if !found.contains(&chain) {
                found.push(chain);
            }
        }
    }
    found
}

/// True iff a non-key, non-prime determinant determines a non-prime attribute.
pub fn transitive_dependency_exists(
    fds: &[FunctionalDependency],
    candidate_keys: &[AttributeSet],
    attributes: &AttributeSet,
) -> bool {
    !transitive_dependencies(fds, candidate_keys, attributes).is_empty()
}

/// Where the candidate keys of an analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    /// Supplied by the caller and verified to be superkeys.
    Hinted,
    /// Computed by candidate-key discovery.
    Derived,
}

/// Candidate keys and prime attributes of one relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyAnalysis {
    pub candidate_keys: Vec<AttributeSet>,
    pub prime: AttributeSet,
    pub source: KeySource,
}

impl KeyAnalysis {
    /// Uses the caller's key hints when given, otherwise discovers keys.
    ///
    /// Each hint must name known attributes and be a superkey; a hint that
    /// is not minimal is accepted with a warning.
    pub fn resolve(
        relation: &Relation,
        fds: &[FunctionalDependency],
        hints: &[AttributeSet],
        search_limit: usize,
    ) -> Result<Self> {
        let attributes = relation.attributes();
        if hints.is_empty() {
            return Self::derive(attributes, fds, search_limit);
        }

        let mut candidate_keys: Vec<AttributeSet> = Vec::with_capacity(hints.len());
        for hint in hints {
            if let Some(missing) = hint.iter().find(|attribute| !attributes.contains(attribute)) {
                return Err(NormalizeError::UnknownAttribute {
                    attribute: missing.to_string(),
                    dependency: format!("key ({hint})"),
                    relation: relation.name().to_string(),
                });
            }
            if !is_superkey(hint, attributes, fds) {
                return Err(NormalizeError::InconsistentKeyHint {
                    key: hint.to_string(),
                    closure: closure(hint, fds).to_string(),
                    relation: relation.name().to_string(),
                });
            }
            if !is_candidate_key(hint, attributes, fds) {
                warn!(
                    relation = %relation.name(),
                    key = %hint,
                    "key hint is a superkey but not minimal"
                );
            }
            if !candidate_keys.contains(hint) {
                candidate_keys.push(hint.ordered_by(attributes));
            }
        }
        Ok(Self {
            prime: prime_attributes(&candidate_keys),
            candidate_keys,
            source: KeySource::Hinted,
        })
    }

    /// Discovers every candidate key of `attributes`.
    pub fn derive(
        attributes: &AttributeSet,
        fds: &[FunctionalDependency],
        search_limit: usize,
    ) -> Result<Self> {
        let candidate_keys = candidate_keys(attributes, fds, search_limit)?;
        Ok(Self {
            prime: prime_attributes(&candidate_keys),
            candidate_keys,
            source: KeySource::Derived,
        })
    }

    /// The key used as primary key: the first candidate key.
    pub fn primary(&self) -> Option<&AttributeSet> {
        self.candidate_keys.first()
    }

    pub fn non_prime(&self, attributes: &AttributeSet) -> AttributeSet {
        attributes.difference(&self.prime)
    }

    /// True when some candidate key is contained in `attributes`.
    pub fn has_key_within(&self, attributes: &AttributeSet) -> bool {
        self.candidate_keys
            .iter()
            .any(|key| key.is_subset(attributes))
    }
}

/// Attributes of `attributes` that occur in some determinant of `fds`.
///
/// An attribute outside every determinant never fires a dependency, so a
/// dependency `X -> Y` holding on `attributes` follows from the one whose
/// determinant is `X` cut down to these attributes.
pub(crate) fn determinant_attributes(
    attributes: &AttributeSet,
    fds: &[FunctionalDependency],
    search_limit: usize,
) -> Result<Vec<String>> {
    let searchable: Vec<String> = attributes
        .iter()
        .filter(|attribute| fds.iter().any(|fd| fd.determinant().contains(attribute)))
        .map(str::to_string)
        .collect();
    if searchable.len() > search_limit {
        return Err(NormalizeError::DependencySearchTooLarge {
            attributes: attributes.to_string(),
            searched: searchable.len(),
            limit: search_limit,
        });
    }
    Ok(searchable)
}

/// Non-empty subsets of an attribute list, smallest first.
pub(crate) struct Subsets {
    attributes: Vec<String>,
    size: usize,
    combinations: Combinations,
}

impl Subsets {
    pub(crate) fn new(attributes: Vec<String>) -> Self {
        let combinations = Combinations::new(attributes.len(), 1);
        Self {
            attributes,
            size: 1,
            combinations,
        }
    }
}

impl Iterator for Subsets {
    type Item = AttributeSet;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(indices) = self.combinations.next() {
                return Some(
                    indices
                        .into_iter()
                        .map(|index| self.attributes[index].as_str())
                        .collect(),
                );
            }
            if self.size >= self.attributes.len() {
                return None;
            }
            self.size += 1;
            self.combinations = Combinations::new(self.attributes.len(), self.size);
        }
    }
}

/// Index combinations of `size` out of `0..len` in lexicographic order.
struct Combinations {
    len: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(len: usize, size: usize) -> Self {
        Self {
            len,
            indices: (0..size).collect(),
            done: size > len,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();
        let size = self.indices.len();
        let mut position = size;
        loop {
            if position == 0 {
                self.done = true;
                break;
            }
            position -= 1;
            if self.indices[position] < self.len - size + position {
                self.indices[position] += 1;
                for next in position + 1..size {
                    self.indices[next] = self.indices[next - 1] + 1;
                }
                break;
            }
        }
        Some(current)
    }
}
