//! Contract coverage for the decoder: value-tree construction, extension
//! behavior, type materialization, and the encode/decode round trip.

use jayson::{
    decode, decode_with_config, decode_with_resolver, encode, DecodeConfig, DecodeError,
    Materialized, Object, TypeResolver, Value,
};
use num_bigint::BigInt;

/// Compare two values, treating NaN as equal to NaN.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(a), Value::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|((ka, va), (kb, vb))| ka == kb && values_equal(va, vb))
        }
        _ => a == b,
    }
}

#[test]
fn empty_composites() {
    assert_eq!(decode(b"[]").unwrap(), Value::Array(vec![]));
    assert_eq!(decode(b"{}").unwrap(), Value::Object(Object::new()));
    assert_eq!(decode(b" [ ] ").unwrap(), Value::Array(vec![]));
}

#[test]
fn duplicate_key_last_wins() {
    let v = decode(br#"{"a":1,"a":2}"#).unwrap();
    let obj = v.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert_eq!(obj["a"], Value::from(2i64));
}

#[test]
fn duplicate_key_keeps_first_position() {
    let v = decode(br#"{"a":1,"b":2,"a":3}"#).unwrap();
    let obj = v.as_object().unwrap();
    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(obj["a"], Value::from(3i64));
}

#[test]
fn integers_are_arbitrary_precision() {
    let v = decode(b"[123456789012345678901234567890]").unwrap();
    let expected: BigInt = "123456789012345678901234567890".parse().unwrap();
    assert_eq!(v.as_array().unwrap()[0], Value::Integer(expected));
}

#[test]
fn integer_and_float_tokens_split_correctly() {
    let v = decode(b"[0, -7, 3.25, -1.5e10, 2e3]").unwrap();
    let arr = v.as_array().unwrap();
    assert!(matches!(arr[0], Value::Integer(_)));
    assert!(matches!(arr[1], Value::Integer(_)));
    assert_eq!(arr[2], Value::Float(3.25));
    assert_eq!(arr[3], Value::Float(-1.5e10));
    assert_eq!(arr[4], Value::Float(2e3));
}

#[test]
fn surrogate_pair_decodes_to_single_scalar() {
    let v = decode(br#"["\ud83d\ude00"]"#).unwrap();
    let s = v.as_array().unwrap()[0].as_str().unwrap().to_string();
    assert_eq!(s, "\u{1F600}");
    assert_eq!(s.as_bytes(), [0xF0, 0x9F, 0x98, 0x80]);
}

#[test]
fn lone_high_surrogate_is_partial_character() {
    let err = decode(br#"["\ud83d"]"#).unwrap_err();
    assert!(matches!(err, DecodeError::PartialCharacter { .. }));
}

#[test]
fn nesting_ceiling_trips_and_clears() {
    let config = DecodeConfig::default().max_nesting(2);
    let err = decode_with_config(b"[[[]]]", &config).unwrap_err();
    assert!(matches!(err, DecodeError::NestingTooDeep { depth: 3 }));

    let config = DecodeConfig::default().max_nesting(3);
    assert!(decode_with_config(b"[[[]]]", &config).is_ok());
}

#[test]
fn default_nesting_ceiling_is_19() {
    let nest = |n: usize| {
        let mut v = Vec::new();
        v.extend(std::iter::repeat(b'[').take(n));
        v.extend(std::iter::repeat(b']').take(n));
        v
    };
    assert!(decode(&nest(19)).is_ok());
    let err = decode(&nest(20)).unwrap_err();
    assert!(matches!(err, DecodeError::NestingTooDeep { depth: 20 }));
}

#[test]
fn bare_nan_at_root_is_rejected_regardless_of_flag() {
    let err = decode(b"NaN").unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedToken { .. }));

    let config = DecodeConfig::default().allow_extended_numerics(true);
    let err = decode_with_config(b"NaN", &config).unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedToken { .. }));
}

#[test]
fn extended_numerics_inside_array() {
    let config = DecodeConfig::default().allow_extended_numerics(true);
    let v = decode_with_config(b"[NaN]", &config).unwrap();
    assert!(matches!(v.as_array().unwrap()[0], Value::Float(f) if f.is_nan()));

    let err = decode(b"[NaN]").unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedToken { .. }));
}

#[test]
fn negative_infinity_is_not_lexed_as_integer_prefix() {
    let config = DecodeConfig::default().allow_extended_numerics(true);
    let v = decode_with_config(b"[-Infinity]", &config).unwrap();
    assert_eq!(v.as_array().unwrap()[0], Value::Float(f64::NEG_INFINITY));
}

#[test]
fn comments_are_ignorable_everywhere() {
    let input = b"/* head */ { // key next\n \"a\" /* gap */ : [1 /* one */, 2] } // tail";
    let v = decode(input).unwrap();
    let obj = v.as_object().unwrap();
    assert_eq!(
        obj["a"],
        Value::Array(vec![Value::from(1i64), Value::from(2i64)])
    );
}

#[test]
fn round_trip_preserves_structure() {
    let input = r#"{"s":"café","n":-3,"f":0.5,"b":[true,false,null],"o":{"k":[{}]}}"#.as_bytes();
    let first = decode(input).unwrap();
    let second = decode(encode(&first).as_bytes()).unwrap();
    assert!(values_equal(&first, &second));
}

#[test]
fn round_trip_extended_numerics() {
    let config = DecodeConfig::default().allow_extended_numerics(true);
    let first = decode_with_config(b"[NaN, Infinity, -Infinity, 1.5]", &config).unwrap();
    let second = decode_with_config(encode(&first).as_bytes(), &config).unwrap();
    assert!(values_equal(&first, &second));
}

#[test]
fn decoding_is_deterministic() {
    let input = br#"{"z":[1,2.5,"x"],"a":{"dup":1,"dup":2}}"#;
    let a = decode(input).unwrap();
    let b = decode(input).unwrap();
    assert_eq!(a, b);

    let e1 = decode(b"[oops]").unwrap_err().to_string();
    let e2 = decode(b"[oops]").unwrap_err().to_string();
    assert_eq!(e1, e2);
}

// ============================================================================
// Type materialization
// ============================================================================

/// Test registry: builds "Point" into an array, declines "Plain", fails on
/// "Boom", and knows nothing else.
struct Registry;

impl TypeResolver for Registry {
    fn resolve_and_build(&self, type_path: &str, fields: &Object) -> jayson::Result<Materialized> {
        match type_path {
            "Point" => Ok(Materialized::Built(Value::Array(vec![
                fields["x"].clone(),
                fields["y"].clone(),
            ]))),
            "Plain" => Ok(Materialized::Declined),
            "Boom" => Err(DecodeError::Resolver("constructor exploded".into())),
            _ => Ok(Materialized::UnknownPath),
        }
    }
}

#[test]
fn tagged_object_is_materialized() {
    let config = DecodeConfig::default();
    let input = br#"[{"json_class":"Point","x":1,"y":2}]"#;
    let v = decode_with_resolver(input, &config, &Registry).unwrap();
    assert_eq!(
        v.as_array().unwrap()[0],
        Value::Array(vec![Value::from(1i64), Value::from(2i64)])
    );
}

#[test]
fn declined_type_keeps_raw_object() {
    let config = DecodeConfig::default();
    let input = br#"{"json_class":"Plain","x":1}"#;
    let v = decode_with_resolver(input, &config, &Registry).unwrap();
    let obj = v.as_object().unwrap();
    assert_eq!(obj["json_class"], Value::from("Plain"));
    assert_eq!(obj["x"], Value::from(1i64));
}

#[test]
fn unknown_path_names_the_path() {
    let config = DecodeConfig::default().type_tag_key("type_tag");
    let input = br#"{"type_tag":"Unknown::Path", "x":1}"#;
    let err = decode_with_resolver(input, &config, &Registry).unwrap_err();
    match err {
        DecodeError::UndefinedType { path } => assert_eq!(path, "Unknown::Path"),
        other => panic!("expected UndefinedType, got {other:?}"),
    }
}

#[test]
fn resolver_failure_propagates() {
    let config = DecodeConfig::default();
    let input = br#"{"json_class":"Boom"}"#;
    let err = decode_with_resolver(input, &config, &Registry).unwrap_err();
    assert!(matches!(err, DecodeError::Resolver(_)));
    assert!(err.to_string().contains("constructor exploded"));
}

#[test]
fn materialization_disabled_keeps_raw_object() {
    let config = DecodeConfig::default().materialize_types(false);
    let input = br#"{"json_class":"Point","x":1,"y":2}"#;
    let v = decode_with_resolver(input, &config, &Registry).unwrap();
    assert!(v.as_object().is_some());
}

#[test]
fn non_string_or_empty_tag_is_not_offered() {
    let config = DecodeConfig::default();
    let v = decode_with_resolver(br#"{"json_class":42}"#, &config, &Registry).unwrap();
    assert!(v.as_object().is_some());

    let v = decode_with_resolver(br#"{"json_class":""}"#, &config, &Registry).unwrap();
    assert!(v.as_object().is_some());
}

#[test]
fn untagged_object_is_not_offered() {
    let config = DecodeConfig::default();
    let v = decode_with_resolver(br#"{"x":1}"#, &config, &Registry).unwrap();
    assert_eq!(v.as_object().unwrap()["x"], Value::from(1i64));
}

#[test]
fn nested_tagged_objects_materialize_bottom_up() {
    let config = DecodeConfig::default();
    let input = br#"{"outer":{"json_class":"Point","x":{"json_class":"Point","x":1,"y":2},"y":3}}"#;
    let v = decode_with_resolver(input, &config, &Registry).unwrap();
    let outer = &v.as_object().unwrap()["outer"];
    // Inner Point became [1, 2] before the outer object was offered.
    assert_eq!(
        *outer,
        Value::Array(vec![
            Value::Array(vec![Value::from(1i64), Value::from(2i64)]),
            Value::from(3i64),
        ])
    );
}
