//! End-to-end normalization scenarios.

use nf_engine::{FormStatus, NormalizeOptions, Normalizer, Outcome, closure};
use nf_model::{
    AttributeSet, Dependencies, FunctionalDependency, NormalForm, NormalizeError, Relation, Row,
    attrs,
};

fn relation(name: &str, attributes: &[&str], rows: &[&[&str]]) -> Relation {
    Relation::new(name, attributes.iter().copied())
        .unwrap()
        .with_rows(rows.iter().map(|row| to_row(row)).collect())
        .unwrap()
}

fn to_row(values: &[&str]) -> Row {
    values.iter().map(ToString::to_string).collect()
}

fn deps(fds: &[&str], mvds: &[&str]) -> Dependencies {
    Dependencies::parse(fds.iter().copied(), mvds.iter().copied()).unwrap()
}

fn decomposed(outcome: Outcome) -> nf_engine::Decomposition {
    match outcome {
        Outcome::Decomposed(decomposition) => decomposition,
        Outcome::AlreadySatisfied { check, .. } => {
            panic!("expected a decomposition, got {check:?}")
        }
    }
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

#[test]
fn transitive_chain_is_synthesized_into_two_relations() {
    let source = relation("r", &["A", "B", "C"], &[]);
    let deps = deps(&["A -> B", "B -> C"], &[]);
    let normalizer = Normalizer::default();

    let check = normalizer
        .check(&source, &deps, NormalForm::Third, &[])
        .unwrap();
    assert_eq!(check.status, FormStatus::Violated);

    let result = decomposed(
        normalizer
            .normalize(&source, &deps, NormalForm::Third, &[])
            .unwrap(),
    );
    let shapes: Vec<(&str, AttributeSet, AttributeSet)> = result
        .relations
        .iter()
        .map(|output| {
            (
                output.relation.name(),
                output.relation.attributes().clone(),
                output.relation.key().clone(),
            )
        })
        .collect();
    assert_eq!(
        shapes,
        vec![
            ("r_a", attrs!["A", "B"], attrs!["A"]),
            ("r_b", attrs!["B", "C"], attrs!["B"]),
        ]
    );
    assert!(result.dependency_preserving);
    assert!(result.lossless);
}

#[test]
fn relation_already_in_bcnf_is_confirmed() {
    let source = relation("r", &["A", "B"], &[]);
    let outcome = Normalizer::default()
        .normalize(&source, &deps(&["A -> B"], &[]), NormalForm::BoyceCodd, &[])
        .unwrap();
    assert!(matches!(outcome, Outcome::AlreadySatisfied { .. }));
}

#[test]
fn composite_key_without_partial_dependency_is_confirmed() {
    let source = relation("r", &["A", "B", "C"], &[]);
    let outcome = Normalizer::default()
        .normalize(
            &source,
            &deps(&["A, B -> C"], &[]),
            NormalForm::Second,
            &[attrs!["A", "B"]],
        )
        .unwrap();
    assert!(matches!(outcome, Outcome::AlreadySatisfied { .. }));
}

#[test]
fn mvd_split_removes_duplicate_rows() {
    let source = relation(
        "r",
        &["A", "B", "C"],
        &[
            &["1", "x", "p"],
            &["1", "x", "q"],
            &["1", "y", "p"],
            &["1", "y", "q"],
        ],
    );
    let result = decomposed(
        Normalizer::default()
            .normalize(&source, &deps(&[], &["A ->> B"]), NormalForm::Fourth, &[])
            .unwrap(),
    );
    assert_eq!(result.relations.len(), 2);
    let left = &result.relations[0].relation;
    let right = &result.relations[1].relation;
    assert_eq!(left.attributes(), &attrs!["A", "B"]);
    assert_eq!(left.rows(), &[to_row(&["1", "x"]), to_row(&["1", "y"])]);
    assert_eq!(right.attributes(), &attrs!["A", "C"]);
    assert_eq!(right.rows(), &[to_row(&["1", "p"]), to_row(&["1", "q"])]);
    assert!(result.lossless);
}

#[test]
fn malformed_dependency_is_rejected_up_front() {
    let err = Dependencies::parse(["A->"], Vec::<&str>::new()).unwrap_err();
    assert!(matches!(err, NormalizeError::InvalidDependencySyntax { .. }));
}

#[test]
fn bcnf_reports_lost_dependency() {
    let source = relation("address", &["Street", "City", "Zip"], &[]);
    let deps = deps(&["City, Street -> Zip", "Zip -> City"], &[]);
    let result = decomposed(
        Normalizer::default()
            .normalize(&source, &deps, NormalForm::BoyceCodd, &[])
            .unwrap(),
    );
    assert!(!result.dependency_preserving);
    assert_eq!(
        result.lost_dependencies,
        vec!["City, Street -> Zip".parse::<FunctionalDependency>().unwrap()]
    );
    assert!(result.notes.iter().any(|note| note.contains("does not preserve")));
    assert!(result.lossless);
}

#[test]
fn second_form_keeps_duplicate_rows_unless_asked() {
    let source = relation(
        "enrolment",
        &["Student", "Course", "Grade", "Name"],
        &[&["1", "db", "A", "ann"], &["1", "os", "B", "ann"]],
    );
    let deps = deps(&["Student, Course -> Grade", "Student -> Name"], &[]);

    let result = decomposed(
        Normalizer::default()
            .normalize(&source, &deps, NormalForm::Second, &[])
            .unwrap(),
    );
    let students = &result.relations[1].relation;
    assert_eq!(students.name(), "enrolment_student");
    assert_eq!(students.rows().len(), 2);

    let result = decomposed(
        Normalizer::new(NormalizeOptions::default().with_deduplication(true))
            .normalize(&source, &deps, NormalForm::Second, &[])
            .unwrap(),
    );
    assert_eq!(result.relations[1].relation.rows().len(), 1);
}

#[test]
fn first_form_target_flattens_composite_values() {
    let source = relation("r", &["A", "B"], &[&["1", "x, y"]]);
    let result = decomposed(
        Normalizer::default()
            .normalize(&source, &deps(&[], &[]), NormalForm::First, &[])
            .unwrap(),
    );
    assert_eq!(result.relations.len(), 1);
    assert_eq!(
        result.relations[0].relation.rows(),
        &[to_row(&["1", "x"]), to_row(&["1", "y"])]
    );
    assert!(result.notes[0].contains("composite values"));
}

#[test]
fn outputs_are_already_in_target_form() {
    let source = relation("r", &["A", "B", "C", "D"], &[]);
    let deps = deps(&["A -> B", "B -> C", "C -> D"], &[]);
    let normalizer = Normalizer::default();
    for target in [NormalForm::Third, NormalForm::BoyceCodd] {
        let result = decomposed(normalizer.normalize(&source, &deps, target, &[]).unwrap());
        for output in &result.relations {
            let again = normalizer
                .normalize(&output.relation, &output.dependencies(), target, &[])
                .unwrap();
            assert!(
                matches!(again, Outcome::AlreadySatisfied { .. }),
                "{} is not in {target}",
                output.relation.name()
            );
        }
    }
}

#[test]
fn bcnf_splits_on_dependency_that_only_appears_in_a_projection() {
    // A, B -> E follows from A -> C, B -> D and C, D -> E. Once C and D are
    // split off, no declared determinant shows it.
    let source = relation("r", &["A", "B", "C", "D", "E", "G"], &[]);
    let deps = deps(&["A -> C", "B -> D", "C, D -> E"], &[]);
    let normalizer = Normalizer::default();
    let result = decomposed(
        normalizer
            .normalize(&source, &deps, NormalForm::BoyceCodd, &[])
            .unwrap(),
    );

    for output in &result.relations {
        let attributes = output.relation.attributes();
        for (subset, reached) in reaches(attributes, &deps.fds) {
            assert!(
                reached.len() == subset.len() || reached.len() == attributes.len(),
                "({subset}) -> ({reached}) breaks BCNF in {}",
                output.relation.name()
            );
        }
        let again = normalizer
            .normalize(
                &output.relation,
                &output.dependencies(),
                NormalForm::BoyceCodd,
                &[],
            )
            .unwrap();
        assert!(matches!(again, Outcome::AlreadySatisfied { .. }));
    }

    let joined = result
        .relations
        .iter()
        .find(|output| output.relation.attributes() == &attrs!["A", "B", "E"])
        .unwrap();
    assert_eq!(
        joined.fds,
        vec!["A, B -> E".parse::<FunctionalDependency>().unwrap()]
    );
    assert_eq!(result.covered_attributes(), *source.attributes());
    assert!(result.lossless);
}

#[test]
fn fifth_form_is_not_verifiable_but_lower_forms_are() {
    let source = relation("r", &["A", "B"], &[]);
    let checks = Normalizer::default()
        .check_all(&source, &deps(&["A -> B"], &[]), &[])
        .unwrap();
    let statuses: Vec<FormStatus> = checks.iter().map(|check| check.status).collect();
    assert_eq!(
        statuses,
        vec![
            FormStatus::Satisfied,
            FormStatus::Satisfied,
            FormStatus::Satisfied,
            FormStatus::Satisfied,
            FormStatus::Satisfied,
            FormStatus::NotVerifiable,
        ]
    );
}

#[test]
fn outcome_serializes_with_tag() {
    let source = relation("r", &["A", "B"], &[]);
    let outcome = Normalizer::default()
        .normalize(&source, &deps(&["A -> B"], &[]), NormalForm::Third, &[])
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["outcome"], "already_satisfied");
    assert_eq!(json["check"]["form"], "3NF");
    assert_eq!(json["primary_key"], serde_json::json!(["A"]));
}
