//! Decomposition towards a target normal form.
//!
//! Each algorithm only chooses attribute sets ([`Fragment`]s). Turning them
//! into relations is shared: every attribute is covered, fragments contained
//! in another are dropped, rows are projected from the source, and the
//! result is audited for dependency preservation and lossless join.

pub mod bcnf;
pub mod flatten;
pub mod fourth;
pub mod second;
pub mod synthesis;

use serde::Serialize;
use tracing::debug;

use nf_model::{
    AttributeSet, Dependencies, FunctionalDependency, MultiValuedDependency, NormalForm, Relation,
    Result,
};

use crate::closure::restricted_closure;
use crate::cover::project_dependencies;
use crate::keys::{KeyAnalysis, candidate_keys};
use crate::lossless::is_lossless;
use crate::naming::{TableNamer, unique_name};
use crate::options::NormalizeOptions;

/// Inputs shared by every decomposition algorithm.
#[derive(Debug, Clone, Copy)]
pub struct Problem<'a> {
    pub relation: &'a Relation,
    pub dependencies: &'a Dependencies,
    pub keys: &'a KeyAnalysis,
    pub options: &'a NormalizeOptions,
}

impl Problem<'_> {
    pub fn attributes(&self) -> &AttributeSet {
        self.relation.attributes()
    }

    pub fn fds(&self) -> &[FunctionalDependency] {
        &self.dependencies.fds
    }

    /// The first candidate key, or every attribute when none is known.
    pub fn primary_key(&self) -> AttributeSet {
        self.keys
            .primary()
            .cloned()
            .unwrap_or_else(|| self.attributes().clone())
    }
}

/// Attribute set chosen by an algorithm, before projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub attributes: AttributeSet,
    /// Key chosen by the algorithm; derived from the projected FDs when absent.
    pub key: Option<AttributeSet>,
    /// Drop duplicate projected rows.
    pub deduplicate: bool,
}

impl Fragment {
    pub fn keyed(attributes: AttributeSet, key: AttributeSet) -> Self {
        Self {
            attributes,
            key: Some(key),
            deduplicate: false,
        }
    }

    pub fn unkeyed(attributes: AttributeSet) -> Self {
        Self {
            attributes,
            key: None,
            deduplicate: false,
        }
    }
}

/// One output relation with the dependencies that hold on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecomposedRelation {
    pub relation: Relation,
    pub fds: Vec<FunctionalDependency>,
    pub mvds: Vec<MultiValuedDependency>,
}

impl DecomposedRelation {
    pub fn dependencies(&self) -> Dependencies {
        Dependencies::new(self.fds.clone(), self.mvds.clone())
    }
}

/// Result of decomposing one relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    pub source: String,
    pub target: NormalForm,
    pub relations: Vec<DecomposedRelation>,
    /// Every declared FD is implied by the FDs holding on the outputs.
    pub dependency_preserving: bool,
    pub lost_dependencies: Vec<FunctionalDependency>,
    /// Natural join of the outputs reconstructs the source.
    pub lossless: bool,
    pub notes: Vec<String>,
}

impl Decomposition {
    /// Union of the output attribute sets.
    pub fn covered_attributes(&self) -> AttributeSet {
        let mut covered = AttributeSet::new();
        for output in &self.relations {
            covered.extend_from(output.relation.attributes());
        }
        covered
    }
}

/// Projects `fragments` out of the problem's relation and audits the result.
pub fn materialize(
    problem: &Problem<'_>,
    fragments: Vec<Fragment>,
    target: NormalForm,
    mut notes: Vec<String>,
    namer: &dyn TableNamer,
) -> Result<Decomposition> {
    let source = problem.relation;
    let attributes = problem.attributes();
    let fds = problem.fds();

    let mut fragments = fragments;
    let mut covered = AttributeSet::new();
    for fragment in &fragments {
        covered.extend_from(&fragment.attributes);
    }
    let uncovered = attributes.difference(&covered);
    if !uncovered.is_empty() {
        let key = problem.primary_key();
        notes.push(format!(
            "attributes ({uncovered}) kept with key ({key}) to cover the source"
        ));
        fragments.push(Fragment::keyed(key.union(&uncovered), key));
    }
    let fragments = drop_contained(fragments);

    let mut relations = Vec::with_capacity(fragments.len());
    let mut taken: Vec<String> = Vec::with_capacity(fragments.len());
    for fragment in &fragments {
        let fragment_attributes = fragment.attributes.ordered_by(attributes);
        let projected_fds = project_dependencies(
            fds,
            &fragment_attributes,
            problem.options.max_key_search_attributes,
        )?;
        let key = match &fragment.key {
            Some(key) => key.ordered_by(attributes),
            None => candidate_keys(
                &fragment_attributes,
                &projected_fds,
                problem.options.max_key_search_attributes,
            )?
            .into_iter()
            .next()
            .unwrap_or_else(|| fragment_attributes.clone()),
        };
        let name = unique_name(namer.name(source.name(), &key), &taken);
        taken.push(name.clone());

        let deduplicate = fragment.deduplicate || problem.options.deduplicate_projections;
        let relation = source
            .project(name, &fragment_attributes, deduplicate)?
            .with_key(key)?;
        let mvds = problem
            .dependencies
            .mvds
            .iter()
            .filter_map(|mvd| mvd.restrict(&fragment_attributes))
            .collect();
        debug!(
            relation = %relation.name(),
            attributes = %relation.attributes(),
            key = %relation.key(),
            rows = relation.rows().len(),
            "projected relation"
        );
        relations.push(DecomposedRelation {
            relation,
            fds: projected_fds,
            mvds,
        });
    }

    let parts: Vec<AttributeSet> = fragments.iter().map(|f| f.attributes.clone()).collect();
    let lost_dependencies: Vec<FunctionalDependency> = fds
        .iter()
        .filter(|fd| {
            !fd.dependent()
                .is_subset(&restricted_closure(fd.determinant(), fds, &parts))
        })
        .cloned()
        .collect();
    if !lost_dependencies.is_empty() {
        let lost: Vec<String> = lost_dependencies.iter().map(ToString::to_string).collect();
        notes.push(format!(
            "{target} decomposition does not preserve: {}",
            lost.join("; ")
        ));
    }
    let lossless = is_lossless(attributes, &parts, fds, &problem.dependencies.mvds);
    if !lossless {
        notes.push("natural join of the outputs may not reconstruct the source".to_string());
    }

    Ok(Decomposition {
        source: source.name().to_string(),
        target,
        relations,
        dependency_preserving: lost_dependencies.is_empty(),
        lost_dependencies,
        lossless,
        notes,
    })
}

/// Removes fragments whose attributes lie inside another fragment.
///
/// Of two equal fragments the first is kept.
fn drop_contained(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut kept: Vec<Fragment> = Vec::with_capacity(fragments.len());
    for (index, fragment) in fragments.iter().enumerate() {
        let contained = fragments.iter().enumerate().any(|(other, candidate)| {
            other != index
                && fragment.attributes.is_subset(&candidate.attributes)
                && (fragment.attributes.len() < candidate.attributes.len() || other < index)
        });
        if !contained {
            kept.push(fragment.clone());
        }
    }
    kept
}
