//! Rendering tests for schema scripts and JSON.

use nf_engine::{Normalizer, Outcome};
use nf_model::{Dependencies, NormalForm, Relation, attrs};
use nf_output::{render_create_table, render_outcome, to_json, write_output};

fn rows(values: &[&[&str]]) -> Vec<Vec<String>> {
    values
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect()
}

fn chain() -> Relation {
    Relation::new("r", ["A", "B", "C"])
        .unwrap()
        .with_rows(rows(&[&["1", "x", "10"], &["2", "y", "20"], &["3", "x", "10"]]))
        .unwrap()
}

fn chain_deps() -> Dependencies {
    Dependencies::parse(["A -> B", "B -> C"], Vec::<&str>::new()).unwrap()
}

#[test]
fn third_form_script() {
    let source = chain();
    let outcome = Normalizer::default()
        .normalize(&source, &chain_deps(), NormalForm::Third, &[])
        .unwrap();
    let script = render_outcome(&outcome, &source);
    insta::assert_snapshot!(script, @r"
-- r decomposed to 3NF: 2 relation(s)
-- dependency preserving: yes, lossless: yes

CREATE TABLE r_a (
    A INT,
    B VARCHAR(1),
    PRIMARY KEY (A)
);

CREATE TABLE r_b (
    B VARCHAR(1),
    C INT,
    PRIMARY KEY (B)
);
");
}

#[test]
fn bcnf_script_lists_lost_dependency() {
    let source = Relation::new("address", ["Street", "City", "Zip"])
        .unwrap()
        .with_rows(rows(&[&["Main St", "Springfield", "12345"]]))
        .unwrap();
    let deps = Dependencies::parse(["City, Street -> Zip", "Zip -> City"], Vec::<&str>::new())
        .unwrap();
    let outcome = Normalizer::default()
        .normalize(&source, &deps, NormalForm::BoyceCodd, &[])
        .unwrap();
    insta::assert_snapshot!(render_outcome(&outcome, &source), @r"
-- address decomposed to BCNF: 2 relation(s)
-- dependency preserving: no, lossless: yes
-- note: BCNF decomposition does not preserve: City, Street -> Zip

CREATE TABLE address_zip (
    City VARCHAR(11),
    Zip INT,
    PRIMARY KEY (Zip)
);

CREATE TABLE address_street_zip (
    Street VARCHAR(7),
    Zip INT,
    PRIMARY KEY (Street, Zip)
);
");
}

#[test]
fn satisfied_relation_is_emitted_with_derived_key() {
    let source = Relation::new("r", ["A", "B"])
        .unwrap()
        .with_rows(rows(&[&["1", "2.5"]]))
        .unwrap();
    assert!(source.key().is_empty());
    let deps = Dependencies::parse(["A -> B"], Vec::<&str>::new()).unwrap();
    let outcome = Normalizer::default()
        .normalize(&source, &deps, NormalForm::BoyceCodd, &[])
        .unwrap();
    assert!(matches!(outcome, Outcome::AlreadySatisfied { .. }));
    insta::assert_snapshot!(render_outcome(&outcome, &source), @r"
-- r already satisfies BCNF

CREATE TABLE r (
    A INT,
    B FLOAT,
    PRIMARY KEY (A)
);
");
}

#[test]
fn satisfied_relation_uses_hinted_key() {
    let source = Relation::new("r", ["A", "B", "C"]).unwrap();
    let deps = Dependencies::parse(["A -> B, C", "B -> A"], Vec::<&str>::new()).unwrap();
    let outcome = Normalizer::default()
        .normalize(&source, &deps, NormalForm::BoyceCodd, &[attrs!["B"]])
        .unwrap();
    let script = render_outcome(&outcome, &source);
    assert!(script.contains("    PRIMARY KEY (B)\n"));
}

#[test]
fn table_without_key_has_no_primary_key_clause() {
    let relation = Relation::new("t", ["Note"]).unwrap();
    insta::assert_snapshot!(render_create_table(&relation), @r"
CREATE TABLE t (
    Note VARCHAR(255)
);
");
}

#[test]
fn json_report_carries_relations_and_flags() {
    let outcome = Normalizer::default()
        .normalize(&chain(), &chain_deps(), NormalForm::Third, &[])
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&to_json(&outcome).unwrap()).unwrap();
    assert_eq!(json["outcome"], "decomposed");
    assert_eq!(json["target"], "3NF");
    assert_eq!(json["dependency_preserving"], true);
    assert_eq!(json["relations"][0]["relation"]["name"], "r_a");
    assert_eq!(json["relations"][0]["fds"][0], "A -> B");
}

#[test]
fn writes_script_to_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("schema.sql");
    write_output(&path, "CREATE TABLE t (\n    A INT\n);\n").unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().starts_with("CREATE TABLE t"));
}
