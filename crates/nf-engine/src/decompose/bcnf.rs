//! Recursive BCNF decomposition.

use tracing::debug;

use nf_model::{AttributeSet, FunctionalDependency, Result};

use super::{Fragment, Problem};
use crate::closure::closure;
use crate::cover::minimal_cover;
use crate::keys::{Subsets, determinant_attributes};

/// Splits on the first violating determinant until every part is in BCNF.
///
/// A determinant `X` inside the current attributes `A` violates BCNF when
/// `closure(X) ∩ A` is neither `A` nor `X` alone. The part is then split
/// into `closure(X) ∩ A` and `(A - closure(X)) ∪ X`. Both are strictly
/// smaller than `A`, so recursion ends after at most `|A| - 1` splits.
/// Determinants are tried in declaration order, then those of the minimal
/// cover, then every subset of `A` built from determinant attributes. The
/// result may lose dependencies; the caller audits that.
pub fn decompose(problem: &Problem<'_>) -> Result<Vec<Fragment>> {
    let fds = problem.fds();
    let mut determinants: Vec<AttributeSet> = Vec::new();
    for fd in fds.iter().chain(minimal_cover(fds).iter()) {
        if !determinants.contains(fd.determinant()) {
            determinants.push(fd.determinant().clone());
        }
    }
    let splitter = Splitter {
        fds,
        determinants: &determinants,
        search_limit: problem.options.max_key_search_attributes,
    };
    let mut fragments = Vec::new();
    splitter.split(problem.attributes().clone(), &mut fragments)?;
    Ok(fragments.into_iter().map(Fragment::unkeyed).collect())
}

struct Splitter<'a> {
    fds: &'a [FunctionalDependency],
    determinants: &'a [AttributeSet],
    search_limit: usize,
}

impl Splitter<'_> {
    /// Parts of `attributes` after BCNF splitting, appended to `out`.
    fn split(&self, attributes: AttributeSet, out: &mut Vec<AttributeSet>) -> Result<()> {
        let Some((determinant, reached)) = self.violation(&attributes)? else {
            out.push(attributes);
            return Ok(());
        };

        let rest = attributes.difference(&reached).union(&determinant);
        debug!(
            determinant = %determinant,
            left = %reached,
            right = %rest,
            "BCNF split"
        );
        self.split(reached.ordered_by(&attributes), out)?;
        self.split(rest.ordered_by(&attributes), out)
    }

    /// First determinant inside `attributes` with its reach, when it
    /// violates BCNF there.
    ///
    /// A part can violate BCNF through a determinant that appears in no
    /// declared dependency, so known determinants are followed by a bounded
    /// subset search.
    fn violation(
        &self,
        attributes: &AttributeSet,
    ) -> Result<Option<(AttributeSet, AttributeSet)>> {
        let reach = |determinant: &AttributeSet| {
            let reached = closure(determinant, self.fds).intersection(attributes);
            (reached.len() < attributes.len() && reached.len() > determinant.len())
                .then_some(reached)
        };
        let known = self
            .determinants
            .iter()
            .filter(|determinant| determinant.is_subset(attributes))
            .find_map(|determinant| {
                reach(determinant).map(|reached| (determinant.clone(), reached))
            });
        if known.is_some() {
            return Ok(known);
        }
        let searchable = determinant_attributes(attributes, self.fds, self.search_limit)?;
        Ok(Subsets::new(searchable)
            .find_map(|determinant| reach(&determinant).map(|reached| (determinant, reached))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyAnalysis;
    use crate::options::NormalizeOptions;
    use nf_model::{Dependencies, Relation, attrs};

    fn bcnf(attributes: &[&str], fds: &[&str]) -> Vec<AttributeSet> {
        let relation = Relation::new("r", attributes.iter().copied()).unwrap();
        let deps = Dependencies::parse(fds.iter().copied(), Vec::<&str>::new()).unwrap();
        let keys = KeyAnalysis::derive(relation.attributes(), &deps.fds, 20).unwrap();
        let options = NormalizeOptions::default();
        decompose(&Problem {
            relation: &relation,
            dependencies: &deps,
            keys: &keys,
            options: &options,
        })
        .unwrap()
        .into_iter()
        .map(|fragment| fragment.attributes)
        .collect()
    }

    #[test]
    fn splits_on_non_key_determinant() {
        let result = bcnf(&["Street", "City", "Zip"], &["City, Street -> Zip", "Zip -> City"]);
        assert_eq!(result, vec![attrs!["City", "Zip"], attrs!["Street", "Zip"]]);
    }

    #[test]
    fn recurses_until_every_part_is_clean() {
        let result = bcnf(&["A", "B", "C", "D"], &["A -> B", "B -> C", "C -> D"]);
        assert_eq!(
            result,
            vec![
                attrs!["C", "D"],
                attrs!["B", "C"],
                attrs!["A", "B"],
            ]
        );
    }

    #[test]
    fn splits_on_determinant_found_only_by_search() {
        let result = bcnf(
            &["A", "B", "C", "D", "E", "G"],
            &["A -> C", "B -> D", "C, D -> E"],
        );
        assert_eq!(
            result,
            vec![
                attrs!["A", "C"],
                attrs!["B", "D"],
                attrs!["A", "B", "E"],
                attrs!["A", "B", "G"],
            ]
        );
    }

    #[test]
    fn relation_in_bcnf_is_one_part() {
        assert_eq!(bcnf(&["A", "B"], &["A -> B"]), vec![attrs!["A", "B"]]);
    }
}
