mod common;

use common::{platform, registered, Action, Gender, IntegerValues};
use dbenum_core::{EnumType, Enumerated, ScalarValue, TypeRegistry};
use proptest::prelude::*;

fn codecs() -> (EnumType, EnumType, EnumType) {
    let mut registry = TypeRegistry::new();
    (
        registered::<Action>(&mut registry),
        registered::<Gender>(&mut registry),
        registered::<IntegerValues>(&mut registry),
    )
}

fn roundtrips<E: Enumerated>(codec: &EnumType, member: &'static E) {
    let encoded = codec.encode(Some(&member.instance()), &platform()).unwrap();
    let decoded = codec
        .decode_as::<E>(Some(&ScalarValue::from(encoded)), &platform())
        .unwrap()
        .unwrap();
    assert!(std::ptr::eq(decoded, member));
}

proptest! {
    #[test]
    fn prop_every_member_roundtrips(a in 0usize..4, g in 0usize..2, i in 0usize..2) {
        let (action, gender, integer) = codecs();
        roundtrips(&action, &Action::values()[a]);
        roundtrips(&gender, &Gender::values()[g]);
        roundtrips(&integer, &IntegerValues::values()[i]);
    }

    #[test]
    fn prop_decode_accepts_exactly_the_declared_values(raw in "[a-z]{0,8}") {
        let (action, _, _) = codecs();
        let declared = Action::values().iter().any(|m| m.to_string() == raw);

        let result = action.decode(Some(&ScalarValue::from(raw.as_str())), &platform());

        prop_assert_eq!(result.is_ok(), declared);
    }

    #[test]
    fn prop_integer_codec_rejects_undeclared(n in any::<i64>()) {
        let (_, _, integer) = codecs();
        let result = integer.decode(Some(&ScalarValue::Integer(n)), &platform());

        prop_assert_eq!(result.is_ok(), n == 1 || n == 2);
        if let Err(err) = result {
            prop_assert_eq!(
                err.to_string(),
                format!(
                    "The value \"{}\" is not valid for the enum \"IntegerValues\". Expected one of [\"1\", \"2\"]",
                    n
                )
            );
        }
    }
}
