//! Unit tests for parameter validation.

use rstest::rstest;
use tabplot::data::{
    DataError, FieldSpec, ParamKind, ParamValue, ParameterSchema, Params, ValidationPolicy,
    validate,
};

fn schema() -> ParameterSchema {
    ParameterSchema::new(vec![
        FieldSpec::new("table_name", ParamKind::String, "Table name"),
        FieldSpec::new("port", ParamKind::Integer, "Port"),
    ])
}

/// Candidate values for one field; `None` means the field is absent
fn candidates() -> Vec<Option<ParamValue>> {
    vec![
        None,
        Some(ParamValue::Text(String::new())),
        Some(ParamValue::Text("sales".into())),
        Some(ParamValue::Integer(0)),
        Some(ParamValue::Integer(5432)),
        Some(ParamValue::Float(1.5)),
        Some(ParamValue::Boolean(true)),
        Some(ParamValue::Boolean(false)),
        Some(ParamValue::Null),
    ]
}

fn acceptable(value: &Option<ParamValue>, kind: ParamKind) -> bool {
    match value {
        Some(v) => !v.is_falsy(true) && v.kind() == kind,
        None => false,
    }
}

#[test]
fn validation_succeeds_exactly_for_present_truthy_well_typed_values() {
    let schema = schema();
    let policy = ValidationPolicy::default();

    for table in candidates() {
        for port in candidates() {
            let mut params = Params::new();
            if let Some(v) = &table {
                params.insert("table_name", v.clone());
            }
            if let Some(v) = &port {
                params.insert("port", v.clone());
            }

            let expected =
                acceptable(&table, ParamKind::String) && acceptable(&port, ParamKind::Integer);
            assert_eq!(
                validate(&schema, &params, &policy).is_ok(),
                expected,
                "table_name={:?} port={:?}",
                table,
                port
            );
        }
    }
}

#[test]
fn empty_schema_accepts_anything() {
    let policy = ValidationPolicy::default();
    assert!(validate(&ParameterSchema::empty(), &Params::new(), &policy).is_ok());
    let junk = Params::new().with("whatever", ParamValue::Null);
    assert!(validate(&ParameterSchema::empty(), &junk, &policy).is_ok());
}

#[test]
fn missing_names_are_listed_in_schema_order() {
    let err = validate(&schema(), &Params::new(), &ValidationPolicy::default()).unwrap_err();
    match err {
        DataError::MissingParameters { missing } => assert_eq!(missing, vec!["table_name", "port"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case(ParamValue::Text(String::new()))]
#[case(ParamValue::Integer(0))]
#[case(ParamValue::Boolean(false))]
#[case(ParamValue::Null)]
fn falsy_values_are_empty(#[case] port: ParamValue) {
    let params = Params::new().with("table_name", "t").with("port", port);
    let err = validate(&schema(), &params, &ValidationPolicy::default()).unwrap_err();
    assert!(matches!(err, DataError::EmptyValue { ref field } if field == "port"));
}

#[test]
fn zero_port_passes_when_zero_is_allowed() {
    let params = Params::new().with("table_name", "t").with("port", 0i64);
    let policy = ValidationPolicy { reject_zero: false };
    assert!(validate(&schema(), &params, &policy).is_ok());
}

#[test]
fn numeric_text_is_not_coerced() {
    let params = Params::new().with("table_name", "t").with("port", "5432");
    let err = validate(&schema(), &params, &ValidationPolicy::default()).unwrap_err();
    assert!(matches!(
        err,
        DataError::TypeMismatch {
            expected: ParamKind::Integer,
            actual: ParamKind::String,
            ..
        }
    ));
}

#[test]
fn form_input_follows_declared_kind() {
    assert_eq!(
        ParamValue::from_input(" 5432 ", ParamKind::Integer),
        ParamValue::Integer(5432)
    );
    assert_eq!(
        ParamValue::from_input("54x", ParamKind::Integer),
        ParamValue::Text("54x".into())
    );
    assert_eq!(
        ParamValue::from_input("42", ParamKind::String),
        ParamValue::Text("42".into())
    );
}
