//! Request routing: validation, key resolution, checking, decomposition.

use serde::Serialize;
use tracing::{info, info_span};

use nf_model::{
    AttributeSet, Dependencies, FunctionalDependency, NormalForm, NormalizeError, Relation,
    Result,
};

use crate::check::{Checker, FormCheck, is_atomic};
use crate::decompose::flatten::flatten;
use crate::decompose::{
    Decomposition, Fragment, Problem, bcnf, fourth, materialize, second, synthesis,
};
use crate::keys::KeyAnalysis;
use crate::naming::{KeyDerivedNamer, TableNamer};
use crate::options::NormalizeOptions;

/// Answer to a normalization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The relation already satisfies the target form; nothing was split.
    AlreadySatisfied {
        check: FormCheck,
        /// Key to declare when the relation is emitted as is.
        primary_key: AttributeSet,
    },
    Decomposed(Decomposition),
}

impl Outcome {
    pub fn decomposition(&self) -> Option<&Decomposition> {
        match self {
            Outcome::AlreadySatisfied { .. } => None,
            Outcome::Decomposed(decomposition) => Some(decomposition),
        }
    }
}

/// Entry point for checks and decompositions.
///
/// Every operation validates the dependencies against the relation before
/// any algorithm runs and never mutates its inputs.
pub struct Normalizer {
    options: NormalizeOptions,
    namer: Box<dyn TableNamer + Send + Sync>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            namer: Box::new(KeyDerivedNamer),
        }
    }

    /// Replaces the naming policy for decomposed relations.
    #[must_use]
    pub fn with_namer(mut self, namer: impl TableNamer + Send + Sync + 'static) -> Self {
        self.namer = Box::new(namer);
        self
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Candidate keys from `hints`, or discovered when no hint is given.
    pub fn analyze_keys(
        &self,
        relation: &Relation,
        fds: &[FunctionalDependency],
        hints: &[AttributeSet],
    ) -> Result<KeyAnalysis> {
        KeyAnalysis::resolve(
            relation,
            fds,
            hints,
            self.options.max_key_search_attributes,
        )
    }

    pub fn check(
        &self,
        relation: &Relation,
        dependencies: &Dependencies,
        form: NormalForm,
        hints: &[AttributeSet],
    ) -> Result<FormCheck> {
        dependencies.validate_against(relation)?;
        let keys = self.analyze_keys(relation, &dependencies.fds, hints)?;
        Ok(self.checker(relation, dependencies, &keys).check(form))
    }

    pub fn check_all(
        &self,
        relation: &Relation,
        dependencies: &Dependencies,
        hints: &[AttributeSet],
    ) -> Result<Vec<FormCheck>> {
        dependencies.validate_against(relation)?;
        let keys = self.analyze_keys(relation, &dependencies.fds, hints)?;
        Ok(self.checker(relation, dependencies, &keys).check_all())
    }

    pub fn highest_normal_form(
        &self,
        relation: &Relation,
        dependencies: &Dependencies,
        hints: &[AttributeSet],
    ) -> Result<Option<NormalForm>> {
        dependencies.validate_against(relation)?;
        let keys = self.analyze_keys(relation, &dependencies.fds, hints)?;
        Ok(self
            .checker(relation, dependencies, &keys)
            .highest_normal_form())
    }

    /// Brings `relation` into `target`.
    ///
    /// Returns [`Outcome::AlreadySatisfied`] with the first candidate key when
    /// the target already holds.
    /// Composite values are flattened first whenever the relation is not in
    /// 1NF. 5NF decomposition is not supported.
    pub fn normalize(
        &self,
        relation: &Relation,
        dependencies: &Dependencies,
        target: NormalForm,
        hints: &[AttributeSet],
    ) -> Result<Outcome> {
        let span = info_span!("normalize", relation = %relation.name(), target = %target);
        let _guard = span.enter();

        dependencies.validate_against(relation)?;
        if target == NormalForm::Fifth {
            return Err(NormalizeError::UnsupportedNormalForm {
                form: target.to_string(),
                reason: "join-dependency decomposition cannot be performed automatically"
                    .to_string(),
            });
        }
        let keys = self.analyze_keys(relation, &dependencies.fds, hints)?;

        let check = self.checker(relation, dependencies, &keys).check(target);
        if check.is_satisfied() {
            info!("relation already satisfies target form");
            let primary_key = keys
                .primary()
                .cloned()
                .unwrap_or_else(|| relation.attributes().clone());
            return Ok(Outcome::AlreadySatisfied { check, primary_key });
        }

        let separator = self.options.multi_value_separator;
        let mut notes = Vec::new();
        let flattened;
        let working = if is_atomic(relation, separator) {
            relation
        } else {
            flattened = flatten(relation, separator)?;
            notes.push(format!(
                "composite values split on '{separator}': {} rows became {}",
                relation.rows().len(),
                flattened.rows().len()
            ));
            &flattened
        };

        let problem = Problem {
            relation: working,
            dependencies,
            keys: &keys,
            options: &self.options,
        };
        let satisfied_after_flatten = self.checker(working, dependencies, &keys).check(target);
        let fragments = if satisfied_after_flatten.is_satisfied() {
            vec![Fragment::keyed(
                working.attributes().clone(),
                problem.primary_key(),
            )]
        } else {
            match target {
                NormalForm::Second => second::decompose(&problem),
                NormalForm::Third => synthesis::decompose(&problem),
                NormalForm::BoyceCodd => bcnf::decompose(&problem)?,
                NormalForm::Fourth => fourth::decompose(&problem)?,
                NormalForm::First | NormalForm::Fifth => vec![Fragment::keyed(
                    working.attributes().clone(),
                    problem.primary_key(),
                )],
            }
        };

        let decomposition = materialize(&problem, fragments, target, notes, self.namer.as_ref())?;
        info!(
            relations = decomposition.relations.len(),
            dependency_preserving = decomposition.dependency_preserving,
            lossless = decomposition.lossless,
            "decomposition complete"
        );
        Ok(Outcome::Decomposed(decomposition))
    }

    fn checker<'a>(
        &self,
        relation: &'a Relation,
        dependencies: &'a Dependencies,
        keys: &'a KeyAnalysis,
    ) -> Checker<'a> {
        Checker::new(
            relation,
            dependencies,
            keys,
            self.options.multi_value_separator,
        )
    }
}
