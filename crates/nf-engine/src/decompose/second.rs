//! 2NF decomposition: one relation per determinant group.

use tracing::debug;

use nf_model::AttributeSet;

use super::{Fragment, Problem};

struct Group {
    determinant: AttributeSet,
    attributes: AttributeSet,
}

/// Groups dependencies by determinant and removes partial dependencies.
///
/// A group whose determinant holds no prime attribute only describes
/// attributes reached through some other group, so it is folded into the
/// first group that already carries that determinant. Each remaining group
/// is keyed by its determinant. The primary key's group also receives any
/// attribute no group mentions; if no group contains a candidate key, a
/// separate key relation is added.
pub fn decompose(problem: &Problem<'_>) -> Vec<Fragment> {
    let prime = &problem.keys.prime;
    let mut groups: Vec<Group> = Vec::new();
    for fd in problem.fds() {
        let dependent = fd.dependent().difference(fd.determinant());
        if dependent.is_empty() {
            continue;
        }
        match groups
            .iter_mut()
            .find(|group| group.determinant == *fd.determinant())
        {
            Some(group) => {
                group.attributes.extend_from(&dependent);
            }
            None => groups.push(Group {
                determinant: fd.determinant().clone(),
                attributes: fd.determinant().union(&dependent),
            }),
        }
    }

    while let Some((from, into)) = find_fold(&groups, prime) {
        let folded = groups.remove(from);
        let into = if into > from { into - 1 } else { into };
        debug!(
            determinant = %folded.determinant,
            into = %groups[into].determinant,
            "folding non-prime determinant group"
        );
        groups[into].attributes.extend_from(&folded.attributes);
    }

    let primary = problem.primary_key();
    let mut covered = AttributeSet::new();
    for group in &groups {
        covered.extend_from(&group.attributes);
    }
    let uncovered = problem.attributes().difference(&covered);
    let has_key = groups
        .iter()
        .any(|group| problem.keys.has_key_within(&group.attributes));

    match groups.iter_mut().find(|group| group.determinant == primary) {
        Some(group) => {
            group.attributes.extend_from(&uncovered);
        }
        None if !has_key || !uncovered.is_empty() => groups.push(Group {
            determinant: primary.clone(),
            attributes: primary.union(&uncovered),
        }),
        None => {}
    }

    groups
        .into_iter()
        .map(|group| Fragment::keyed(group.attributes, group.determinant))
        .collect()
}

/// First group with a fully non-prime determinant that another group covers.
fn find_fold(groups: &[Group], prime: &AttributeSet) -> Option<(usize, usize)> {
    groups.iter().enumerate().find_map(|(from, group)| {
        if !group.determinant.is_disjoint(prime) {
            return None;
        }
        groups
            .iter()
            .enumerate()
            .position(|(into, other)| {
                into != from && group.determinant.is_subset(&other.attributes)
            })
            .map(|into| (from, into))
    })
}
