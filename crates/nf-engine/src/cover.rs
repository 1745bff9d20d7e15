//! Minimal covers and dependency projection.

use nf_model::{AttributeSet, FunctionalDependency, Result};

use crate::closure::closure;
use crate::keys::{Subsets, determinant_attributes};

/// Canonical (minimal) cover of `fds`.
///
/// Every dependency in the result has a single dependent attribute, no
/// extraneous determinant attribute, and is not implied by the others.
/// Declaration order is kept so the result is deterministic.
pub fn minimal_cover(fds: &[FunctionalDependency]) -> Vec<FunctionalDependency> {
    let mut cover: Vec<FunctionalDependency> = Vec::new();
    for fd in fds.iter().flat_map(FunctionalDependency::split) {
        if !fd.is_trivial() && !cover.contains(&fd) {
            cover.push(fd);
        }
    }

    for index in 0..cover.len() {
        let original: Vec<String> = cover[index].determinant().to_vec();
        let mut determinant = cover[index].determinant().clone();
        for attribute in &original {
            if determinant.len() <= 1 {
                break;
            }
            let mut reduced = determinant.clone();
            reduced.remove(attribute);
            if cover[index].dependent().is_subset(&closure(&reduced, &cover)) {
                determinant = reduced;
            }
        }
        if let Ok(reduced) =
            FunctionalDependency::new(determinant, cover[index].dependent().clone())
        {
            cover[index] = reduced;
        }
    }

    let mut deduplicated: Vec<FunctionalDependency> = Vec::with_capacity(cover.len());
    for fd in cover {
        if !deduplicated.contains(&fd) {
            deduplicated.push(fd);
        }
    }
    let mut cover = deduplicated;

    let mut index = 0;
    while index < cover.len() {
        let candidate = cover.remove(index);
        let redundant = candidate
            .dependent()
            .is_subset(&closure(candidate.determinant(), &cover));
        if !redundant {
            cover.insert(index, candidate);
            index += 1;
        }
    }
    cover
}

/// Merges dependencies that share a determinant, keeping first-seen order.
pub fn combine_by_determinant(fds: &[FunctionalDependency]) -> Vec<FunctionalDependency> {
    let mut groups: Vec<(AttributeSet, AttributeSet)> = Vec::new();
    for fd in fds {
        match groups
            .iter_mut()
            .find(|(determinant, _)| determinant == fd.determinant())
        {
            Some((_, dependent)) => {
                dependent.extend_from(fd.dependent());
            }
            None => groups.push((fd.determinant().clone(), fd.dependent().clone())),
        }
    }
    groups
        .into_iter()
        .filter_map(|(determinant, dependent)| {
            FunctionalDependency::new(determinant, dependent).ok()
        })
        .collect()
}

/// Dependencies that hold on the sub-relation `attributes`.
///
/// Determinants of `fds` (and of its minimal cover) lying inside
/// `attributes` are tried first, then every subset of its determinant
/// attributes, smallest first. A projection can hold a dependency whose
/// determinant is declared nowhere: `A -> C`, `B -> D` and `C, D -> E` give
/// `A, B -> E` on `(A, B, E)`. Each determinant is closed under the full
/// set, cut back to `attributes`, and kept only when what it reaches is not
/// already implied. The result is minimised and grouped by determinant.
pub fn project_dependencies(
    fds: &[FunctionalDependency],
    attributes: &AttributeSet,
    search_limit: usize,
) -> Result<Vec<FunctionalDependency>> {
    let cover = minimal_cover(fds);
    let declared = fds
        .iter()
        .chain(cover.iter())
        .map(|fd| fd.determinant().clone())
        .filter(|determinant| determinant.is_subset(attributes));
    let searched = Subsets::new(determinant_attributes(attributes, fds, search_limit)?);

    let mut projected: Vec<FunctionalDependency> = Vec::new();
    for determinant in declared.chain(searched) {
        let reached = closure(&determinant, fds).intersection(attributes);
        if reached.is_subset(&closure(&determinant, &projected)) {
            continue;
        }
        let implied = reached.difference(&determinant);
        if let Ok(fd) = FunctionalDependency::new(determinant, implied) {
            projected.push(fd);
        }
    }
    Ok(combine_by_determinant(&minimal_cover(&projected)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_model::attrs;

    fn fds(lines: &[&str]) -> Vec<FunctionalDependency> {
        lines.iter().map(|line| line.parse().unwrap()).collect()
    }

    fn render(fds: &[FunctionalDependency]) -> Vec<String> {
        fds.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn removes_transitively_implied_dependency() {
        let cover = minimal_cover(&fds(&["A -> B", "B -> C", "A -> C"]));
        assert_eq!(render(&cover), vec!["A -> B", "B -> C"]);
    }

    #[test]
    fn removes_extraneous_determinant_attribute() {
        let cover = minimal_cover(&fds(&["A -> B", "A, B -> C"]));
        assert_eq!(render(&cover), vec!["A -> B", "A -> C"]);
    }

    #[test]
    fn splits_and_drops_trivial_parts() {
        let cover = minimal_cover(&fds(&["A -> A, B"]));
        assert_eq!(render(&cover), vec!["A -> B"]);
    }

    #[test]
    fn combine_groups_dependents() {
        let combined = combine_by_determinant(&fds(&["A -> B", "C -> D", "A -> E"]));
        assert_eq!(render(&combined), vec!["A -> B, E", "C -> D"]);
    }

    #[test]
    fn projection_keeps_derived_dependency() {
        // A -> B -> C projected onto (A, C) still gives A -> C.
        let projected =
            project_dependencies(&fds(&["A -> B", "B -> C"]), &attrs!["A", "C"], 20).unwrap();
        assert_eq!(render(&projected), vec!["A -> C"]);
    }

    #[test]
    fn projection_onto_unrelated_attributes_is_empty() {
        let projected = project_dependencies(&fds(&["A -> B"]), &attrs!["B", "C"], 20).unwrap();
        assert!(projected.is_empty());
    }

    #[test]
    fn projection_finds_undeclared_determinant() {
        let fds = fds(&["A -> C", "B -> D", "C, D -> E"]);
        let projected = project_dependencies(&fds, &attrs!["A", "B", "E", "G"], 20).unwrap();
        assert_eq!(render(&projected), vec!["A, B -> E"]);
    }

    #[test]
    fn projection_search_is_bounded() {
        let fds = fds(&["A, B -> C"]);
        let err = project_dependencies(&fds, &attrs!["A", "B"], 1).unwrap_err();
        assert_eq!(err.code(), "DEPENDENCY_SEARCH_TOO_LARGE");
    }
}
