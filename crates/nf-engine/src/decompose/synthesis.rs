//! 3NF synthesis from a minimal cover.

use super::{Fragment, Problem};
use crate::cover::{combine_by_determinant, minimal_cover};

/// One relation per determinant of the minimal cover, keyed by that
/// determinant, plus a key relation when none of them holds a candidate key.
///
/// Dependencies implied only by transitivity never reach the cover, so a
/// chain `A -> B -> C` yields `(A, B)` and `(B, C)` rather than also
/// `(A, C)`. Every cover dependency lives whole inside one output, which
/// makes the result dependency preserving.
pub fn decompose(problem: &Problem<'_>) -> Vec<Fragment> {
    let cover = combine_by_determinant(&minimal_cover(problem.fds()));
    let mut fragments: Vec<Fragment> = cover
        .iter()
        .map(|fd| Fragment::keyed(fd.attributes(), fd.determinant().clone()))
        .collect();

    let holds_key = fragments
        .iter()
        .any(|fragment| problem.keys.has_key_within(&fragment.attributes));
    if !holds_key {
        let key = problem.primary_key();
        fragments.push(Fragment::keyed(key.clone(), key));
    }
    fragments
}
