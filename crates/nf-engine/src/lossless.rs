//! Lossless-join test by the tableau chase.

use nf_model::{AttributeSet, FunctionalDependency, MultiValuedDependency};

/// Rows the chase may hold before giving up.
const MAX_TABLEAU_ROWS: usize = 4096;

/// Symbol 0 is the distinguished symbol of its column.
type Tableau = Vec<Vec<usize>>;

/// True when joining `fragments` always reconstructs the relation over
/// `attributes` under `fds` and `mvds`.
///
/// The tableau starts with one row per fragment, distinguished on the
/// fragment's attributes. Functional dependencies equate symbols, and
/// multi-valued dependencies add swapped rows, until nothing changes.
/// The join is lossless once some row is fully distinguished. A chase that
/// outgrows its row limit reports `false`.
pub fn is_lossless(
    attributes: &AttributeSet,
    fragments: &[AttributeSet],
    fds: &[FunctionalDependency],
    mvds: &[MultiValuedDependency],
) -> bool {
    if fragments.iter().any(|fragment| attributes.is_subset(fragment)) {
        return true;
    }
    let columns: Vec<&str> = attributes.iter().collect();
    let indices = |set: &AttributeSet| -> Vec<usize> {
        columns
            .iter()
            .enumerate()
            .filter(|(_, name)| set.contains(name))
            .map(|(index, _)| index)
            .collect()
    };

    let mut next_symbol = 1;
    let mut tableau: Tableau = fragments
        .iter()
        .map(|fragment| {
            columns
                .iter()
                .map(|name| {
                    if fragment.contains(name) {
                        0
                    } else {
                        next_symbol += 1;
                        next_symbol
                    }
                })
                .collect()
        })
        .collect();

    let fd_rules: Vec<(Vec<usize>, Vec<usize>)> = fds
        .iter()
        .filter(|fd| fd.determinant().is_subset(attributes))
        .map(|fd| (indices(fd.determinant()), indices(fd.dependent())))
        .collect();
    let mvd_rules: Vec<(Vec<usize>, Vec<usize>)> = mvds
        .iter()
        .filter_map(|mvd| mvd.restrict(attributes))
        .map(|mvd| (indices(mvd.determinant()), indices(mvd.dependent())))
        .collect();

    loop {
        if tableau.iter().any(|row| row.iter().all(|&symbol| symbol == 0)) {
            return true;
        }
        let mut changed = false;
        for (determinant, dependent) in &fd_rules {
            changed |= apply_fd(&mut tableau, determinant, dependent);
        }
        for (determinant, dependent) in &mvd_rules {
            changed |= apply_mvd(&mut tableau, determinant, dependent);
            if tableau.len() > MAX_TABLEAU_ROWS {
                return false;
            }
        }
        if !changed {
            return tableau.iter().any(|row| row.iter().all(|&symbol| symbol == 0));
        }
    }
}

fn agree(left: &[usize], right: &[usize], columns: &[usize]) -> bool {
    columns.iter().all(|&column| left[column] == right[column])
}

/// Equates dependent symbols of rows agreeing on the determinant.
fn apply_fd(tableau: &mut Tableau, determinant: &[usize], dependent: &[usize]) -> bool {
    let mut changed = false;
    for first in 0..tableau.len() {
        for second in first + 1..tableau.len() {
            if !agree(&tableau[first], &tableau[second], determinant) {
                continue;
            }
            for &column in dependent {
                let (a, b) = (tableau[first][column], tableau[second][column]);
                if a == b {
                    continue;
                }
                let (keep, replace) = (a.min(b), a.max(b));
                for row in tableau.iter_mut() {
                    if row[column] == replace {
                        row[column] = keep;
                    }
                }
                changed = true;
            }
        }
    }
    changed
}

/// Adds the row taking the dependent from one row and the rest from another.
fn apply_mvd(tableau: &mut Tableau, determinant: &[usize], dependent: &[usize]) -> bool {
    let mut added = Vec::new();
    for first in &*tableau {
        for second in &*tableau {
            if first == second || !agree(first, second, determinant) {
                continue;
            }
            let mut row = second.clone();
            for &column in dependent {
                row[column] = first[column];
            }
            if !tableau.contains(&row) && !added.contains(&row) {
                added.push(row);
            }
        }
    }
    let changed = !added.is_empty();
    tableau.extend(added);
    changed
}
