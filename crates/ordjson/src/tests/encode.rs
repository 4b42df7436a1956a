use alloc::string::ToString;
use alloc::vec;

use crate::{parse_str, Value, Whitespace};

#[test]
fn canonical_output_matches_canonical_input() {
    let source = r#"{"a":1,"b":[true,null,-0.5e+2]}"#;
    assert_eq!(parse_str(source).to_json(), source);
}

#[test]
fn canonical_output_strips_whitespace() {
    assert_eq!(parse_str("  [ 1 , 2 ]  ").to_json(), "[1,2]");
    assert_eq!(parse_str("{ \"a\" :\t1 }").to_json(), r#"{"a":1}"#);
}

#[test]
fn display_is_canonical_json() {
    let value = parse_str(r#"[1,"x",{"k":null}]"#);
    assert_eq!(value.to_string(), value.to_json());
}

#[test]
fn error_values_render_their_message_as_a_string() {
    assert_eq!(Value::Error("bad".into()).to_json(), r#""bad""#);
}

#[test]
fn non_utf8_string_payloads_render_replacement_escapes() {
    let value = Value::String(vec![b'a', 0xff]);
    assert_eq!(value.to_json(), r#""a\ufffd""#);
}

#[test]
fn keys_emit_in_insertion_order_until_sorted() {
    let mut value = parse_str(r#"{"b":1,"c":2,"a":3}"#);
    assert_eq!(value.to_json(), r#"{"b":1,"c":2,"a":3}"#);
    value.as_object_mut().unwrap().sort();
    assert_eq!(value.to_json(), r#"{"a":3,"b":1,"c":2}"#);
    value.as_object_mut().unwrap().rsort();
    assert_eq!(value.to_json(), r#"{"c":2,"b":1,"a":3}"#);
}

#[test]
fn space_lf_layout() {
    let value = parse_str(r#"{"a":[1,2],"b":{},"c":"x"}"#);
    let expected = "{\n  \"a\":[\n    1,\n    2\n  ],\n  \"b\":{},\n  \"c\":\"x\"\n}";
    assert_eq!(value.to_json_with(Whitespace::SpaceLf), expected);
}

#[test]
fn tab_lf_layout() {
    let value = parse_str(r#"{"a":[1,2],"b":{},"c":"x"}"#);
    let expected = "{\n\t\"a\":[\n\t\t1,\n\t\t2\n\t],\n\t\"b\":{},\n\t\"c\":\"x\"\n}";
    assert_eq!(value.to_json_with(Whitespace::TabLf), expected);
}

#[test]
fn crlf_styles_match_their_lf_counterparts() {
    let value = parse_str(r#"[[1],{"a":2}]"#);
    let space_lf = value.to_json_with(Whitespace::SpaceLf);
    let tab_lf = value.to_json_with(Whitespace::TabLf);
    assert_eq!(
        value.to_json_with(Whitespace::SpaceCrlf),
        space_lf.replace('\n', "\r\n")
    );
    assert_eq!(
        value.to_json_with(Whitespace::TabCrlf),
        tab_lf.replace('\n', "\r\n")
    );
}

#[test]
fn scalars_and_empty_containers_ignore_style() {
    for style in [
        Whitespace::SpaceLf,
        Whitespace::TabLf,
        Whitespace::SpaceCrlf,
        Whitespace::TabCrlf,
    ] {
        assert_eq!(Value::Null.to_json_with(style), "null");
        assert_eq!(Value::from(12_i64).to_json_with(style), "12");
        assert_eq!(Value::from("x").to_json_with(style), r#""x""#);
        assert_eq!(parse_str("[]").to_json_with(style), "[]");
        assert_eq!(parse_str("{}").to_json_with(style), "{}");
    }
}

#[test]
fn styled_output_reparses_to_the_same_value() {
    let value = parse_str(r#"{"a":[1,[true,null]],"b":{"c":"x","d":[]}}"#);
    for style in [
        Whitespace::SpaceLf,
        Whitespace::TabLf,
        Whitespace::SpaceCrlf,
        Whitespace::TabCrlf,
    ] {
        assert_eq!(parse_str(&value.to_json_with(style)), value);
    }
}
