//! 4NF decomposition: BCNF first, then multi-valued dependency splits.

use tracing::debug;

use nf_model::{FunctionalDependency, MultiValuedDependency, Result};

use super::{Fragment, Problem, bcnf};
use crate::keys::is_superkey;

/// Every functional dependency is also a multi-valued one, so the BCNF parts
/// are computed first. Each part is then split on the first MVD, restricted
/// to the part, whose determinant is not a superkey of it:
/// `T1 = X ∪ Y` and `T2 = X ∪ (A - X - Y)`. Parts produced by an MVD split
/// drop duplicate rows.
pub fn decompose(problem: &Problem<'_>) -> Result<Vec<Fragment>> {
    let fds = problem.fds();
    let mvds = &problem.dependencies.mvds;
    let mut fragments = Vec::new();
    for part in bcnf::decompose(problem)? {
        split(part, fds, mvds, &mut fragments);
    }
    Ok(fragments)
}

fn split(
    fragment: Fragment,
    fds: &[FunctionalDependency],
    mvds: &[MultiValuedDependency],
    out: &mut Vec<Fragment>,
) {
    let attributes = &fragment.attributes;
    let violation = mvds
        .iter()
        .filter_map(|mvd| mvd.restrict(attributes))
        .find(|mvd| !is_superkey(mvd.determinant(), attributes, fds));
    let Some(mvd) = violation else {
        out.push(fragment);
        return;
    };

    let left = mvd.attributes().ordered_by(attributes);
    let right = mvd
        .determinant()
        .union(&mvd.complement(attributes))
        .ordered_by(attributes);
    debug!(mvd = %mvd, left = %left, right = %right, "4NF split");
    for part in [left, right] {
        split(
            Fragment {
                attributes: part,
                key: None,
                deduplicate: true,
            },
            fds,
            mvds,
            out,
        );
    }
}
