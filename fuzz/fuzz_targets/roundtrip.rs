#![no_main]

use arbitrary::Arbitrary;
use binson_decoder::{Decoder, Item};
use binson_encoder::Encoder;
use libfuzzer_sys::fuzz_target;

// Fuzz target: encode -> decode roundtrip over structured documents.
//
// Derives a random document tree, encodes it, decodes the bytes with a
// full walk, and asserts every decoded item equals its input (doubles
// compared by bit pattern so NaN payloads count too).
//
// Catches bugs in:
// - Width class selection at integer boundaries
// - Length prefix encoding for strings and byte blobs
// - Nesting and end-marker bookkeeping on both sides

#[derive(Arbitrary, Debug)]
enum Value {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

#[derive(Arbitrary, Debug)]
struct Doc {
    fields: Vec<(String, Value)>,
}

fuzz_target!(|doc: Doc| {
    let mut bytes = Vec::new();
    let mut enc = Encoder::new(&mut bytes);
    enc.begin_object().unwrap();
    for (name, value) in &doc.fields {
        enc.write_field_name(name).unwrap();
        encode_value(&mut enc, value);
    }
    enc.end_object().unwrap();
    enc.flush().unwrap();
    drop(enc);

    let mut dec = Decoder::new(bytes.as_slice());
    check_object(&mut dec, &doc.fields);
    assert!(dec.next_field().is_err());
});

fn encode_value<W: std::io::Write>(enc: &mut Encoder<W>, value: &Value) {
    match value {
        Value::Boolean(b) => enc.write_bool(*b).unwrap(),
        Value::Integer(i) => enc.write_integer(*i).unwrap(),
        Value::Double(d) => enc.write_double(*d).unwrap(),
        Value::Str(s) => enc.write_string(s).unwrap(),
        Value::Bytes(b) => enc.write_bytes(b).unwrap(),
        Value::Array(items) => {
            enc.begin_array().unwrap();
            for item in items {
                encode_value(enc, item);
            }
            enc.end_array().unwrap();
        }
        Value::Object(fields) => {
            enc.begin_object().unwrap();
            for (name, v) in fields {
                enc.write_field_name(name).unwrap();
                encode_value(enc, v);
            }
            enc.end_object().unwrap();
        }
    }
}

/// Which container kind holds the value being checked. The ascend call
/// after a nested container must assert the parent's kind.
#[derive(Clone, Copy)]
enum Parent {
    Object,
    Array,
}

fn check_object<R: std::io::Read>(dec: &mut Decoder<R>, fields: &[(String, Value)]) {
    for (name, value) in fields {
        let field = dec.next_field().unwrap().expect("missing field");
        assert_eq!(&field.name, name);
        check_value(dec, &field.value, value, Parent::Object);
    }
    assert!(dec.next_field().unwrap().is_none());
}

fn check_value<R: std::io::Read>(
    dec: &mut Decoder<R>,
    decoded: &Item,
    expected: &Value,
    parent: Parent,
) {
    match (decoded, expected) {
        (Item::Boolean(a), Value::Boolean(b)) => assert_eq!(a, b),
        (Item::Integer(a), Value::Integer(b)) => assert_eq!(a, b),
        (Item::Double(a), Value::Double(b)) => assert_eq!(a.to_bits(), b.to_bits()),
        (Item::String(a), Value::Str(b)) => assert_eq!(a, b),
        (Item::Bytes(a), Value::Bytes(b)) => assert_eq!(a, b),
        (Item::Array, Value::Array(items)) => {
            dec.enter_array().unwrap();
            for item in items {
                let got = dec.next_array_value().unwrap().expect("missing element");
                check_value(dec, &got, item, Parent::Array);
            }
            assert!(dec.next_array_value().unwrap().is_none());
            ascend(dec, parent);
        }
        (Item::Object, Value::Object(fields)) => {
            dec.enter_object().unwrap();
            check_object(dec, fields);
            ascend(dec, parent);
        }
        (got, want) => panic!("decoded {got:?}, expected {want:?}"),
    }
}

fn ascend<R: std::io::Read>(dec: &mut Decoder<R>, parent: Parent) {
    match parent {
        Parent::Object => dec.up_to_object().unwrap(),
        Parent::Array => dec.up_to_array().unwrap(),
    }
}
