//! Property tests over random dependency sets.

use proptest::prelude::*;

use nf_engine::keys::{candidate_keys, is_candidate_key};
use nf_engine::{Normalizer, Outcome, closure, is_superkey};
use nf_model::{AttributeSet, Dependencies, FunctionalDependency, NormalForm, Relation};

const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

fn from_mask(mask: u8) -> AttributeSet {
    NAMES
        .iter()
        .enumerate()
        .filter(|(index, _)| mask & (1 << index) != 0)
        .map(|(_, name)| *name)
        .collect()
}

fn arb_fds() -> impl Strategy<Value = Vec<FunctionalDependency>> {
    prop::collection::vec((1u8..64, 0usize..NAMES.len()), 0..7).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter_map(|(mask, dependent)| {
                FunctionalDependency::new(from_mask(mask), AttributeSet::from_iter([NAMES[dependent]]))
                    .ok()
            })
            .collect()
    })
}

fn all() -> AttributeSet {
    AttributeSet::from_iter(NAMES)
}

/// Every non-empty subset of `attributes` with the part of its closure
/// inside `attributes`.
fn reaches(
    attributes: &AttributeSet,
    fds: &[FunctionalDependency],
) -> Vec<(AttributeSet, AttributeSet)> {
    let names = attributes.as_slice();
    (1u32..(1 << names.len()))
        .map(|mask| {
            let subset: AttributeSet = names
                .iter()
                .enumerate()
                .filter(|(index, _)| mask & (1 << index) != 0)
                .map(|(_, name)| name.as_str())
                .collect();
            let reached = closure(&subset, fds).intersection(attributes);
            (subset, reached)
        })
        .collect()
}

/// A subset of `attributes` reaching more than itself but not all of them.
fn bcnf_violation(attributes: &AttributeSet, fds: &[FunctionalDependency]) -> Option<String> {
    reaches(attributes, fds)
        .into_iter()
        .find(|(subset, reached)| {
            reached.len() > subset.len() && reached.len() < attributes.len()
        })
        .map(|(subset, reached)| format!("({subset}) -> ({reached})"))
}

/// A non-superkey subset of `attributes` reaching a non-prime attribute.
fn third_form_violation(
    attributes: &AttributeSet,
    fds: &[FunctionalDependency],
) -> Option<String> {
    let reaches = reaches(attributes, fds);
    let superkeys: Vec<&AttributeSet> = reaches
        .iter()
        .filter(|(_, reached)| reached.len() == attributes.len())
        .map(|(subset, _)| subset)
        .collect();
    let mut prime = AttributeSet::new();
    for key in &superkeys {
        if !superkeys.iter().any(|other| other.is_proper_subset(key)) {
            prime.extend_from(key);
        }
    }
    reaches
        .iter()
        .filter(|(_, reached)| reached.len() < attributes.len())
        .find_map(|(subset, reached)| {
            reached
                .difference(subset)
                .iter()
                .find(|attribute| !prime.contains(attribute))
                .map(|attribute| format!("({subset}) -> {attribute}"))
        })
}

proptest! {
    #[test]
    fn prop_closure_contains_seed_and_is_fixed_point(mask in 1u8..64, fds in arb_fds()) {
        let seed = from_mask(mask);
        let reached = closure(&seed, &fds);
        prop_assert!(reached.is_superset(&seed));
        prop_assert_eq!(closure(&reached, &fds), reached);
    }

    #[test]
    fn prop_superkey_iff_closure_is_everything(mask in 1u8..64, fds in arb_fds()) {
        let candidate = from_mask(mask);
        prop_assert_eq!(
            is_superkey(&candidate, &all(), &fds),
            closure(&candidate, &fds) == all()
        );
    }

    #[test]
    fn prop_derived_keys_are_minimal_superkeys(fds in arb_fds()) {
        let keys = candidate_keys(&all(), &fds, 20).unwrap();
        prop_assert!(!keys.is_empty());
        for key in &keys {
            prop_assert!(is_candidate_key(key, &all(), &fds));
        }
    }

    #[test]
    fn prop_decompositions_cover_every_attribute(fds in arb_fds()) {
        let relation = Relation::new("r", NAMES).unwrap();
        let deps = Dependencies::new(fds, Vec::new());
        let normalizer = Normalizer::default();
        for target in [NormalForm::Second, NormalForm::Third, NormalForm::BoyceCodd] {
            if let Outcome::Decomposed(result) =
                normalizer.normalize(&relation, &deps, target, &[]).unwrap()
            {
                prop_assert_eq!(result.covered_attributes(), all());
                prop_assert!(result.lossless);
            }
        }
    }

    #[test]
    fn prop_outputs_are_in_target_form(fds in arb_fds()) {
        let relation = Relation::new("r", NAMES).unwrap();
        let deps = Dependencies::new(fds.clone(), Vec::new());
        let normalizer = Normalizer::default();
        for target in [NormalForm::Third, NormalForm::BoyceCodd] {
            let parts: Vec<AttributeSet> =
                match normalizer.normalize(&relation, &deps, target, &[]).unwrap() {
                    Outcome::Decomposed(result) => result
                        .relations
                        .iter()
                        .map(|output| output.relation.attributes().clone())
                        .collect(),
                    Outcome::AlreadySatisfied { .. } => vec![all()],
                };
            for part in &parts {
                let violation = if target == NormalForm::Third {
                    third_form_violation(part, &fds)
                } else {
                    bcnf_violation(part, &fds)
                };
                prop_assert!(
                    violation.is_none(),
                    "{} output ({}) has {:?}",
                    target,
                    part,
                    violation
                );
            }
        }
    }

    #[test]
    fn prop_third_form_synthesis_preserves_dependencies(fds in arb_fds()) {
        let relation = Relation::new("r", NAMES).unwrap();
        let deps = Dependencies::new(fds, Vec::new());
        if let Outcome::Decomposed(result) = Normalizer::default()
            .normalize(&relation, &deps, NormalForm::Third, &[])
            .unwrap()
        {
            prop_assert!(result.dependency_preserving);
        }
    }
}
