//! End-to-end scenarios through the public API.

use ordjson::{base64_decode, base64_encode, encode_string, parse, parse_str, NumberError, Value};

#[test]
fn object_with_mixed_array_round_trips() {
    let source = r#"{"a":1,"b":[true,null,-0.5e+2]}"#;
    let value = parse_str(source);

    let map = value.as_object().expect("object root");
    assert_eq!(map.len(), 2);
    let keys: Vec<&[u8]> = map.keys().map(|k| k.as_slice()).collect();
    assert_eq!(keys, [b"a".as_slice(), b"b"]);
    assert_eq!(map.get(b"a".as_slice()), Some(&Value::Number("1".into())));

    let items = map.get(b"b".as_slice()).and_then(Value::as_array).unwrap();
    assert_eq!(items[0], Value::Boolean(true));
    assert_eq!(items[1], Value::Null);
    assert_eq!(items[2], Value::Number("-0.5e+2".into()));

    assert_eq!(value.to_json(), source);
}

#[test]
fn whitespace_heavy_array() {
    let value = parse(b"  [ \"x\" , \"y\" ]  ");
    assert_eq!(
        value,
        Value::Array(vec![Value::from("x"), Value::from("y")])
    );
    assert_eq!(value.to_json(), r#"["x","y"]"#);
}

#[test]
fn escape_decoding() {
    assert_eq!(
        parse(br#""a\u00e9b""#),
        Value::String(vec![0x61, 0xc3, 0xa9, 0x62])
    );
    assert_eq!(
        parse(br#""\uD834\uDD1E""#),
        Value::String(vec![0xf0, 0x9d, 0x84, 0x9e])
    );
}

#[test]
fn invalid_utf8_in_string_is_an_error() {
    assert!(parse(b"\x22\xff\x22").is_error());
}

#[test]
fn duplicate_key_keeps_position_and_takes_last_value() {
    let value = parse(br#"{"a":1,"a":2}"#);
    let map = value.as_object().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(b"a".as_slice()), Some(&Value::Number("2".into())));
    assert_eq!(map.find(b"a".as_slice()).map(|(pos, ..)| pos), Some(1));
}

#[test]
fn leading_zero_and_trailing_comma_are_errors() {
    assert!(parse(b"01").is_error());
    assert!(parse(b"[1,]").is_error());
}

#[test]
fn numeric_conversions() {
    assert_eq!(parse(b"42").to_i32(), Ok(42));
    assert_eq!(parse(b"-42").to_i64(), Ok(-42));
    assert_eq!(parse(b"42").to_u32(), Ok(42));
    assert_eq!(parse(b"18446744073709551615").to_u64(), Ok(u64::MAX));

    // Out of range propagates the parse error.
    assert!(matches!(
        parse(b"4294967296").to_i32(),
        Err(NumberError::Parse(_))
    ));
    assert!(matches!(parse(b"-1").to_u32(), Err(NumberError::Parse(_))));
    // Wrong variant is its own error kind.
    assert_eq!(parse(b"null").to_i32(), Err(NumberError::NotANumber));
}

#[test]
fn programmatic_construction() {
    let mut map = ordjson::Map::new();
    map.insert(b"flag".to_vec(), Value::from(true));
    map.insert(b"count".to_vec(), Value::from(-3_i32));
    map.insert(b"big".to_vec(), Value::from(u64::MAX));
    map.insert(b"name".to_vec(), Value::from("ord"));
    let value = Value::Object(map);
    assert_eq!(
        value.to_json(),
        r#"{"flag":true,"count":-3,"big":18446744073709551615,"name":"ord"}"#
    );

    assert_eq!(Value::default(), Value::Null);
    assert_eq!(
        Value::number_from_str("6.02e23"),
        Some(Value::Number("6.02e23".into()))
    );
    assert_eq!(Value::number_from_str("6.02e"), None);
}

#[test]
fn sorting_an_object_reorders_output() {
    let mut value = parse_str(r#"{"delta":4,"alpha":1,"charlie":3,"bravo":2}"#);
    value.as_object_mut().unwrap().sort();
    assert_eq!(
        value.to_json(),
        r#"{"alpha":1,"bravo":2,"charlie":3,"delta":4}"#
    );
    value.as_object_mut().unwrap().rsort();
    assert_eq!(
        value.to_json(),
        r#"{"delta":4,"charlie":3,"bravo":2,"alpha":1}"#
    );
}

#[test]
fn encode_string_is_standalone() {
    assert_eq!(encode_string("x\ny"), "\"x\\ny\"");
    let decoded = parse_str(&encode_string(b"\x00\xff"));
    assert_eq!(
        decoded.as_bytes(),
        Some([0x00, 0xef, 0xbf, 0xbd].as_slice())
    );
}

#[test]
fn base64_round_trip() {
    let payload = b"any carnal pleasure.";
    let encoded = base64_encode(payload);
    assert_eq!(encoded, "YW55IGNhcm5hbCBwbGVhc3VyZS4=");
    assert_eq!(base64_decode(&encoded).as_deref(), Ok(payload.as_slice()));
    assert!(base64_decode("not base64!").is_err());
}

#[test]
fn parse_never_panics_on_fuzzish_inputs() {
    let samples: &[&[u8]] = &[
        b"",
        b"\x00",
        b"\xff\xfe\xfd",
        b"[[[[[[[[",
        b"{\"",
        b"\"\\u",
        b"\"\\uD8",
        b"123e",
        b"[{\"a\":[}]",
        b"nullnull",
    ];
    for &sample in samples {
        let _ = parse(sample);
    }
}
