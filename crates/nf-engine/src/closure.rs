//! Attribute closure under a set of functional dependencies.

use nf_model::{AttributeSet, FunctionalDependency};

/// Every attribute reachable from `attributes` through `fds`.
///
/// Repeatedly applies each dependency whose determinant is already inside the
/// result until a full pass adds nothing. Each dependency fires at most once,
/// so the loop runs at most `fds.len() + 1` passes. The seed attributes come
/// first in the returned set, followed by derived attributes in the order
/// they were reached.
pub fn closure(attributes: &AttributeSet, fds: &[FunctionalDependency]) -> AttributeSet {
    let mut result = attributes.clone();
    let mut applied = vec![false; fds.len()];
    loop {
        let mut changed = false;
        for (index, fd) in fds.iter().enumerate() {
            if applied[index] || !fd.determinant().is_subset(&result) {
                continue;
            }
            applied[index] = true;
            if result.extend_from(fd.dependent()) > 0 {
                changed = true;
            }
        }
        if !changed {
            return result;
        }
    }
}

/// True when `fds` logically implies `fd`.
pub fn implies(fds: &[FunctionalDependency], fd: &FunctionalDependency) -> bool {
    fd.dependent()
        .is_subset(&closure(fd.determinant(), fds))
}

/// Closure of `attributes` using only what each fragment can enforce locally.
///
/// Each round takes the part of the result visible inside a fragment, closes
/// it under `fds`, and keeps what lands back inside that fragment. A
/// dependency `X -> Y` is preserved by the fragments exactly when `Y` is
/// contained in the restricted closure of `X`.
pub fn restricted_closure(
    attributes: &AttributeSet,
    fds: &[FunctionalDependency],
    fragments: &[AttributeSet],
) -> AttributeSet {
    let mut result = attributes.clone();
    loop {
        let before = result.len();
        for fragment in fragments {
            let seed = result.intersection(fragment);
            let reached = closure(&seed, fds).intersection(fragment);
            result.extend_from(&reached);
        }
        if result.len() == before {
            return result;
        }
    }
}
