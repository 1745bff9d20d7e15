//! Tests for nf-model types.

use nf_model::{Dependencies, NormalizeError, Relation, attrs};

fn orders() -> Relation {
    Relation::new("orders", ["OrderId", "Customer", "City"]).unwrap()
}

#[test]
fn dependencies_parse_both_kinds() {
    let deps = Dependencies::parse(
        ["OrderId -> Customer", "Customer -> City"],
        ["OrderId ->> City"],
    )
    .unwrap();
    assert_eq!(deps.fds.len(), 2);
    assert_eq!(deps.mvds.len(), 1);
    assert!(deps.validate_against(&orders()).is_ok());
}

#[test]
fn validate_reports_unknown_attribute() {
    let deps = Dependencies::parse(["OrderId -> Zip"], Vec::<&str>::new()).unwrap();
    let err = deps.validate_against(&orders()).unwrap_err();
    match err {
        NormalizeError::UnknownAttribute {
            attribute,
            dependency,
            relation,
        } => {
            assert_eq!(attribute, "Zip");
            assert_eq!(dependency, "OrderId -> Zip");
            assert_eq!(relation, "orders");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn validate_checks_mvds_too() {
    let deps = Dependencies::parse(Vec::<&str>::new(), ["OrderId ->> Item"]).unwrap();
    assert!(matches!(
        deps.validate_against(&orders()),
        Err(NormalizeError::UnknownAttribute { .. })
    ));
}

#[test]
fn relation_serializes_with_key() {
    let relation = orders().with_key(attrs!["OrderId"]).unwrap();
    let json = serde_json::to_value(&relation).unwrap();
    assert_eq!(json["name"], "orders");
    assert_eq!(json["key"][0], "OrderId");
    assert_eq!(json["attributes"].as_array().unwrap().len(), 3);
}
