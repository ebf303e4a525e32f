mod common;

use common::{platform, registered, Action, Gender, IntegerValues, NotAnEnum};
use dbenum_core::{
    ColumnSpec, DbEnumError, EnumInstance, EnumType, Enumerated, ExError, ExErrorKind,
    InlineEnumDeclaration, MySqlPlatform, PostgreSqlPlatform, ScalarValue, TypeDescriptor,
    TypeRegistry,
};
use std::sync::Arc;

#[test]
fn test_enum_types_are_registered() {
    // Given: An empty registry
    let mut registry = TypeRegistry::new();
    assert!(!registry.has_type(Action::NAME));
    assert!(!registry.has_type("gender"));

    // When: One type is registered by identifier and one under a key
    registry.enum_types().register::<Action>().unwrap();
    registry
        .enum_types()
        .register_many([(Some("gender"), TypeDescriptor::of::<Gender>())])
        .unwrap();

    // Then: Both keys are present
    assert!(registry.has_type("Action"));
    assert!(registry.has_type("gender"));
}

#[test]
fn test_registered_codecs_carry_their_key_as_name() {
    let mut registry = TypeRegistry::new();

    registry
        .enum_types()
        .register_many([
            (Some("gender"), TypeDescriptor::of::<Gender>()),
            (None, TypeDescriptor::of::<Action>()),
        ])
        .unwrap();

    let action = registry.get_type("Action").unwrap();
    assert_eq!(action.name(), "Action");
    assert_eq!(action.enum_class().name(), "Action");

    let gender = registry.get_type("gender").unwrap();
    assert_eq!(gender.name(), "gender");
    assert_eq!(gender.enum_class().name(), "Gender");
}

#[test]
fn test_register_type_without_capability_fails() {
    let mut registry = TypeRegistry::new();

    let err = registry
        .enum_types()
        .register_descriptor("thing", TypeDescriptor::of_type::<NotAnEnum>())
        .unwrap_err();

    let expected_name = std::any::type_name::<NotAnEnum>();
    assert_eq!(
        err.to_string(),
        format!(
            "Provided enum type \"{}\" is not valid. Enums must implement \"Enumerated\".",
            expected_name
        )
    );
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidConfiguration);
    assert!(!registry.has_type("thing"));
}

#[test]
fn test_sql_declaration_comes_from_platform() {
    let mut registry = TypeRegistry::new();
    let codec = registered::<Gender>(&mut registry);

    let column = ColumnSpec::new("gender").with_length(12);
    assert_eq!(codec.sql_declaration(&column, &MySqlPlatform), "VARCHAR(12)");
    assert_eq!(
        codec.sql_declaration(&ColumnSpec::new("gender"), &PostgreSqlPlatform),
        "VARCHAR(255)"
    );
}

#[test]
fn test_encode_writes_underlying_value() {
    let mut registry = TypeRegistry::new();
    let action = registered::<Action>(&mut registry);
    let gender = registered::<Gender>(&mut registry);

    let cases: Vec<(&EnumType, EnumInstance, &str)> = vec![
        (&action, Action::Create.instance(), "create"),
        (&action, Action::Read.instance(), "read"),
        (&action, Action::Update.instance(), "update"),
        (&action, Action::Delete.instance(), "delete"),
        (&gender, Gender::Female.instance(), "female"),
        (&gender, Gender::Male.instance(), "male"),
    ];

    for (codec, value, expected) in cases {
        assert_eq!(
            codec.encode(Some(&value), &platform()).as_deref(),
            Some(expected)
        );
    }
}

#[test]
fn test_encode_integer_values_as_decimal_text() {
    let mut registry = TypeRegistry::new();
    let codec = registered::<IntegerValues>(&mut registry);

    assert_eq!(
        codec
            .encode(Some(&IntegerValues::Two.instance()), &platform())
            .as_deref(),
        Some("2")
    );
}

#[test]
fn test_encode_none_is_none() {
    let mut registry = TypeRegistry::new();
    let codec = registered::<Action>(&mut registry);

    assert_eq!(codec.encode(None, &platform()), None);
}

#[test]
fn test_decode_valid_value_returns_member() {
    let mut registry = TypeRegistry::new();
    let codec = registered::<Action>(&mut registry);

    let value = codec
        .decode(Some(&ScalarValue::from("create")), &platform())
        .unwrap()
        .unwrap();
    assert!(value.is::<Action>());
    assert_eq!(value.downcast::<Action>(), Some(&Action::Create));

    let value = codec
        .decode_as::<Action>(Some(&ScalarValue::from("delete")), &platform())
        .unwrap();
    assert_eq!(value, Some(&Action::Delete));
}

#[test]
fn test_decode_integer_backed_from_any_scalar() {
    let mut registry = TypeRegistry::new();
    let codec = registered::<IntegerValues>(&mut registry);

    for raw in [
        ScalarValue::Integer(1),
        ScalarValue::from("1"),
        ScalarValue::Real(1.0),
    ] {
        let value = codec.decode_as::<IntegerValues>(Some(&raw), &platform());
        assert_eq!(value.unwrap(), Some(&IntegerValues::One), "raw: {:?}", raw);
    }
}

#[test]
fn test_decode_none_is_none() {
    let mut registry = TypeRegistry::new();
    let codec = registered::<Action>(&mut registry);

    assert!(codec.decode(None, &platform()).unwrap().is_none());
}

#[test]
fn test_decode_invalid_value_lists_expected() {
    let mut registry = TypeRegistry::new();
    let codec = registered::<Gender>(&mut registry);

    let err = codec
        .decode(Some(&ScalarValue::from("invalid")), &platform())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"The value "invalid" is not valid for the enum "Gender". Expected one of ["male", "female"]"#
    );
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidConfiguration);
}

#[test]
fn test_decode_invalid_value_names_enum_not_key() {
    let mut registry = TypeRegistry::new();
    registry.enum_types().register_as::<Gender>("gender").unwrap();
    let codec = registry.get_type("gender").unwrap();

    let err = codec
        .decode(Some(&ScalarValue::Integer(3)), &platform())
        .unwrap_err();

    assert_eq!(
        err,
        DbEnumError::InvalidEnumValue {
            value: "3".into(),
            enum_name: "Gender".into(),
            expected: vec!["male".into(), "female".into()],
        }
    );
}

#[test]
fn test_decode_as_wrong_type_is_internal() {
    let mut registry = TypeRegistry::new();
    let codec = registered::<Gender>(&mut registry);

    let err = codec
        .decode_as::<Action>(Some(&ScalarValue::from("male")), &platform())
        .unwrap_err();
    assert!(matches!(err, DbEnumError::Internal { .. }));
}

#[test]
fn test_decode_returns_singleton_members() {
    let mut registry = TypeRegistry::new();
    let codec = registered::<Action>(&mut registry);

    let first = codec
        .decode_as::<Action>(Some(&ScalarValue::from("read")), &platform())
        .unwrap()
        .unwrap();
    let second = codec
        .decode_as::<Action>(Some(&ScalarValue::from("read")), &platform())
        .unwrap()
        .unwrap();

    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, Action::Read.member()));
}

#[test]
fn test_inline_enum_declaration() {
    let mut registry = TypeRegistry::new();
    registry
        .enum_types_with(Arc::new(InlineEnumDeclaration))
        .register::<Action>()
        .unwrap();

    let codec = registry.get_type("Action").unwrap();
    assert_eq!(
        codec.sql_declaration(&ColumnSpec::new("action"), &MySqlPlatform),
        r#"ENUM("create", "read", "update", "delete") COMMENT "Action""#
    );
}

#[test]
fn test_unregistered_codec_is_named_enum() {
    let codec = EnumType::of::<Action>();
    assert_eq!(codec.name(), "enum");
    assert_eq!(codec.comment_hint(), "(EnumType:enum)");
}

#[test]
fn test_comment_hint_is_always_required() {
    let mut registry = TypeRegistry::new();
    let gender = registered::<Gender>(&mut registry);
    let unregistered = EnumType::of::<IntegerValues>();

    for codec in [&gender, &unregistered] {
        assert!(codec.requires_comment_hint(&MySqlPlatform));
        assert!(codec.requires_comment_hint(&PostgreSqlPlatform));
        assert!(codec.requires_comment_hint(&platform()));
    }
    assert_eq!(gender.comment_hint(), "(EnumType:Gender)");
}
