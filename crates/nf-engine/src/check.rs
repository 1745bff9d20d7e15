//! Normal-form checks.
//!
//! Each form is evaluated on its own, but a form whose prerequisite does not
//! hold is reported as [`FormStatus::PrerequisiteViolated`] naming the
//! weakest failing form, never as a plain verdict. The chain is
//! 1NF <- 2NF <- 3NF <- BCNF <- 4NF <- 5NF.

use serde::Serialize;

use nf_model::{
    AttributeSet, Dependencies, FunctionalDependency, MultiValuedDependency, NormalForm, Relation,
};

use crate::keys::{
    KeyAnalysis, PartialDependency, TransitiveDependency, is_superkey, partial_dependencies,
    transitive_dependencies,
};

/// Outcome of checking one normal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Satisfied,
    Violated,
    /// A lower form fails; the payload is the weakest failing form.
    PrerequisiteViolated(NormalForm),
    /// The form cannot be decided automatically (5NF join dependencies).
    NotVerifiable,
}

/// One reason a form does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A stored value contains the multi-value separator.
    CompositeValue {
        attribute: String,
        row: usize,
        value: String,
    },
    PartialDependency(PartialDependency),
    TransitiveDependency(TransitiveDependency),
    /// A non-trivial dependency whose determinant is not a superkey.
    NonSuperkeyDeterminant { dependency: FunctionalDependency },
    /// A non-trivial multi-valued dependency whose determinant is not a superkey.
    NonSuperkeyMultivaluedDeterminant { dependency: MultiValuedDependency },
}

impl Violation {
    pub fn describe(&self) -> String {
        match self {
            Violation::CompositeValue {
                attribute,
                row,
                value,
            } => format!("row {row}: {attribute} holds composite value '{value}'"),
            Violation::PartialDependency(partial) => format!(
                "{} depends on part of key ({})",
                partial.dependency, partial.key
            ),
            Violation::TransitiveDependency(chain) => format!(
                "{} -> {} -> {} is transitive",
                chain.key, chain.via, chain.dependent
            ),
            Violation::NonSuperkeyDeterminant { dependency } => {
                format!("{dependency}: determinant is not a superkey")
            }
            Violation::NonSuperkeyMultivaluedDeterminant { dependency } => {
                format!("{dependency}: determinant is not a superkey")
            }
        }
    }
}

/// Result of checking one form on one relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormCheck {
    pub form: NormalForm,
    pub status: FormStatus,
    pub violations: Vec<Violation>,
}

impl FormCheck {
    pub fn is_satisfied(&self) -> bool {
        self.status == FormStatus::Satisfied
    }
}

/// True when no value of `relation` contains `separator`.
pub fn is_atomic(relation: &Relation, separator: char) -> bool {
    relation
        .rows()
        .iter()
        .all(|row| row.iter().all(|value| !value.contains(separator)))
}

/// Evaluates normal forms for one relation with fixed dependencies and keys.
#[derive(Debug)]
pub struct Checker<'a> {
    relation: &'a Relation,
    dependencies: &'a Dependencies,
    keys: &'a KeyAnalysis,
    separator: char,
}

impl<'a> Checker<'a> {
    pub fn new(
        relation: &'a Relation,
        dependencies: &'a Dependencies,
        keys: &'a KeyAnalysis,
        separator: char,
    ) -> Self {
        Self {
            relation,
            dependencies,
            keys,
            separator,
        }
    }

    /// Checks `form`, reporting failing prerequisites explicitly.
    pub fn check(&self, form: NormalForm) -> FormCheck {
        if let Some(prerequisite) = form.prerequisite() {
            let lower = self.check(prerequisite);
            let failing = match lower.status {
                FormStatus::Satisfied => None,
                FormStatus::PrerequisiteViolated(weakest) => Some(weakest),
                FormStatus::Violated | FormStatus::NotVerifiable => Some(prerequisite),
            };
            if let Some(failing) = failing {
                return FormCheck {
                    form,
                    status: FormStatus::PrerequisiteViolated(failing),
                    violations: lower.violations,
                };
            }
        }
        if form == NormalForm::Fifth {
            return FormCheck {
                form,
                status: FormStatus::NotVerifiable,
                violations: Vec::new(),
            };
        }
        let violations = self.violations(form);
        let status = if violations.is_empty() {
            FormStatus::Satisfied
        } else {
            FormStatus::Violated
        };
        FormCheck {
            form,
            status,
            violations,
        }
    }

    /// Checks every form from 1NF to 5NF.
    pub fn check_all(&self) -> Vec<FormCheck> {
        NormalForm::ALL
            .iter()
            .map(|&form| self.check(form))
            .collect()
    }

    /// The strongest form that is verified to hold, if any.
    pub fn highest_normal_form(&self) -> Option<NormalForm> {
        NormalForm::ALL
            .iter()
            .copied()
            .take_while(|&form| self.check(form).is_satisfied())
            .last()
    }

    /// Violations of `form` alone, ignoring prerequisites.
    fn violations(&self, form: NormalForm) -> Vec<Violation> {
        let attributes = self.relation.attributes();
        let fds = self.dependencies.fds.as_slice();
        match form {
            NormalForm::First => self.composite_values(),
            NormalForm::Second => partial_dependencies(fds, &self.keys.candidate_keys)
                .into_iter()
                .map(Violation::PartialDependency)
                .collect(),
            NormalForm::Third => self.third_form_violations(attributes, fds),
            NormalForm::BoyceCodd => fds
                .iter()
                .filter(|fd| !fd.is_trivial() && fd.determinant().is_subset(attributes))
                .filter(|fd| !is_superkey(fd.determinant(), attributes, fds))
                .map(|fd| Violation::NonSuperkeyDeterminant {
                    dependency: fd.clone(),
                })
                .collect(),
            NormalForm::Fourth => self
                .dependencies
                .mvds
                .iter()
                .filter(|mvd| mvd.restrict(attributes).is_some())
                .filter(|mvd| !is_superkey(mvd.determinant(), attributes, fds))
                .map(|mvd| Violation::NonSuperkeyMultivaluedDeterminant {
                    dependency: mvd.clone(),
                })
                .collect(),
            NormalForm::Fifth => Vec::new(),
        }
    }

    fn composite_values(&self) -> Vec<Violation> {
        let mut found = Vec::new();
        for (row_index, row) in self.relation.rows().iter().enumerate() {
            for (attribute, value) in self.relation.attributes().iter().zip(row) {
                if value.contains(self.separator) {
                    found.push(Violation::CompositeValue {
                        attribute: attribute.to_string(),
                        row: row_index,
                        value: value.clone(),
                    });
                }
            }
        }
        found
    }

    /// Transitive chains, plus any remaining dependency `X -> A` where `X` is
    /// not a superkey and `A` is non-prime.
    fn third_form_violations(
        &self,
        attributes: &AttributeSet,
        fds: &[FunctionalDependency],
    ) -> Vec<Violation> {
        let mut found: Vec<Violation> =
            transitive_dependencies(fds, &self.keys.candidate_keys, attributes)
                .into_iter()
                .map(Violation::TransitiveDependency)
                .collect();
        for fd in fds.iter().flat_map(FunctionalDependency::split) {
            if fd.is_trivial()
                || !fd.determinant().is_subset(&self.keys.prime)
                || is_superkey(fd.determinant(), attributes, fds)
                || !fd.dependent().is_disjoint(&self.keys.prime)
            {
                continue;
            }
            let partial = self
                .keys
                .candidate_keys
                .iter()
                .any(|key| fd.determinant().is_proper_subset(key));
            if !partial {
                found.push(Violation::NonSuperkeyDeterminant { dependency: fd });
            }
        }
        found
    }
}
