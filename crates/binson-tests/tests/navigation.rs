//! Navigation integration tests: implicit skipping, field seeking, and
//! the caller-asserted ascend contract, exercised over multi-level
//! documents built with the real encoder.

use binson_decoder::{DecodeError, Decoder, Item, State};
use binson_encoder::Encoder;

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// {"a": 1, "b": {"c": 3}, "d": 4}
fn doc_with_nested_object() -> Vec<u8> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    enc.begin_object().unwrap();
    enc.write_field_name("a").unwrap();
    enc.write_integer(1).unwrap();
    enc.write_field_name("b").unwrap();
    enc.begin_object().unwrap();
    enc.write_field_name("c").unwrap();
    enc.write_integer(3).unwrap();
    enc.end_object().unwrap();
    enc.write_field_name("d").unwrap();
    enc.write_integer(4).unwrap();
    enc.end_object().unwrap();
    enc.flush().unwrap();
    drop(enc);
    out
}

/// {"a": 1, "b": [10, [100, 101], 20], "c": 3}
fn doc_with_nested_arrays() -> Vec<u8> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    enc.begin_object().unwrap();
    enc.write_field_name("a").unwrap();
    enc.write_integer(1).unwrap();
    enc.write_field_name("b").unwrap();
    enc.begin_array().unwrap();
    enc.write_integer(10).unwrap();
    enc.begin_array().unwrap();
    enc.write_integer(100).unwrap();
    enc.write_integer(101).unwrap();
    enc.end_array().unwrap();
    enc.write_integer(20).unwrap();
    enc.end_array().unwrap();
    enc.write_field_name("c").unwrap();
    enc.write_integer(3).unwrap();
    enc.end_object().unwrap();
    enc.flush().unwrap();
    drop(enc);
    out
}

// ── Seeking and implicit skip ─────────────────────────────────────────────────

#[test]
fn find_field_skips_unentered_object() {
    let bytes = doc_with_nested_object();
    let mut dec = Decoder::new(bytes.as_slice());
    // Seeking "d" walks past "a" and the whole unread object at "b".
    assert_eq!(dec.find_field("d").unwrap(), Some(Item::Integer(4)));
}

#[test]
fn find_field_skips_nested_arrays() {
    let bytes = doc_with_nested_arrays();
    let mut dec = Decoder::new(bytes.as_slice());
    assert_eq!(dec.find_field("c").unwrap(), Some(Item::Integer(3)));
}

#[test]
fn find_field_miss_is_not_an_error() {
    let bytes = doc_with_nested_object();
    let mut dec = Decoder::new(bytes.as_slice());
    assert_eq!(dec.find_field("missing").unwrap(), None);
    assert_eq!(dec.state(), State::EndOfObject);
    // The miss did not poison the decoder; the next misuse reports the
    // real state, not Poisoned.
    let err = dec.next_field().unwrap_err();
    assert!(matches!(
        err,
        DecodeError::NotBeforeField {
            state: State::EndOfObject
        }
    ));
}

#[test]
fn partial_array_read_then_skip_of_remainder() {
    let bytes = doc_with_nested_arrays();
    let mut dec = Decoder::new(bytes.as_slice());
    assert_eq!(dec.find_field("b").unwrap(), Some(Item::Array));
    dec.enter_array().unwrap();
    assert_eq!(dec.next_array_value().unwrap(), Some(Item::Integer(10)));
    // The inner array and the trailing 20 are still unread; ascending
    // drains them all.
    dec.up_to_object().unwrap();
    assert_eq!(dec.find_field("c").unwrap(), Some(Item::Integer(3)));
}

#[test]
fn descend_into_inner_array_and_back_twice() {
    let bytes = doc_with_nested_arrays();
    let mut dec = Decoder::new(bytes.as_slice());
    assert_eq!(dec.find_field("b").unwrap(), Some(Item::Array));
    dec.enter_array().unwrap();
    assert_eq!(dec.next_array_value().unwrap(), Some(Item::Integer(10)));
    assert_eq!(dec.next_array_value().unwrap(), Some(Item::Array));
    dec.enter_array().unwrap();
    assert_eq!(dec.next_array_value().unwrap(), Some(Item::Integer(100)));
    dec.up_to_array().unwrap();
    assert_eq!(dec.next_array_value().unwrap(), Some(Item::Integer(20)));
    assert_eq!(dec.next_array_value().unwrap(), None);
    dec.up_to_object().unwrap();
    assert_eq!(dec.find_field("c").unwrap(), Some(Item::Integer(3)));
}

#[test]
fn skip_is_a_byte_level_skim_not_a_reparse() {
    // The fast-forward path only checks signature validity and length
    // bounds; it does not re-validate that names inside the skipped
    // container are Strings. The same bytes fail when walked for real.
    // Hand-built: {"a": {<integer in name position>, ...}, "d": 4}
    let bytes: &[u8] = &[
        0x40, 0x14, 0x01, b'a', 0x40, 0x10, 0x05, 0x10, 0x01, 0x41, 0x14, 0x01, b'd', 0x10, 0x04,
        0x41,
    ];

    let mut skimming = Decoder::new(bytes);
    assert_eq!(skimming.next_field().unwrap().unwrap().value, Item::Object);
    // Not entering "a": the malformed name slides by unnoticed.
    assert_eq!(skimming.find_field("d").unwrap(), Some(Item::Integer(4)));

    let mut walking = Decoder::new(bytes);
    assert_eq!(walking.next_field().unwrap().unwrap().value, Item::Object);
    walking.enter_object().unwrap();
    let err = walking.next_field().unwrap_err();
    assert!(matches!(
        err,
        DecodeError::FieldNameNotString { found: 0x10 }
    ));
}

// ── Ascend contract ───────────────────────────────────────────────────────────

#[test]
fn ascend_directly_from_container_end() {
    let bytes = doc_with_nested_object();
    let mut dec = Decoder::new(bytes.as_slice());
    assert_eq!(dec.find_field("b").unwrap(), Some(Item::Object));
    dec.enter_object().unwrap();
    while dec.next_field().unwrap().is_some() {}
    assert_eq!(dec.state(), State::EndOfObject);
    dec.up_to_object().unwrap();
    assert_eq!(dec.find_field("d").unwrap(), Some(Item::Integer(4)));
}

#[test]
fn exit_kind_is_caller_asserted() {
    // The decoder takes the caller's word for the parent's kind: after
    // finishing the object at "b", up_to_array repositions the cursor
    // as if the parent were an array. The mismatch surfaces on the next
    // read, not at the ascend itself.
    let bytes = doc_with_nested_object();
    let mut dec = Decoder::new(bytes.as_slice());
    assert_eq!(dec.find_field("b").unwrap(), Some(Item::Object));
    dec.enter_object().unwrap();
    dec.up_to_array().unwrap();
    assert_eq!(dec.state(), State::BeforeArrayValue);
    // The next bytes are the field "d" of the parent object; reading
    // them as an array element decodes the name String as a value.
    assert_eq!(
        dec.next_array_value().unwrap(),
        Some(Item::String("d".into()))
    );
}

#[test]
fn ascend_at_root_end_has_no_parent_to_resume() {
    let bytes = doc_with_nested_object();
    let mut dec = Decoder::new(bytes.as_slice());
    assert_eq!(dec.find_field("zzz").unwrap(), None);
    assert_eq!(dec.state(), State::EndOfObject);
    // Nothing stops the caller from asserting a parent that does not
    // exist; the resulting read then fails with EOF, not a panic.
    dec.up_to_object().unwrap();
    let err = dec.next_field().unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedEof));
}
