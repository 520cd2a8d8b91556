//! Fixture generator for manual CLI testing.
//!
//! Writes a handful of `.binson` files under `tests/fixtures/` so the
//! `binson inspect` and `binson validate` commands can be exercised by
//! hand without writing encoding code first.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_vectors -p binson-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File               | Contents                                      |
//! |--------------------|-----------------------------------------------|
//! | empty.binson       | `{}`                                          |
//! | scalars.binson     | One field per scalar class                    |
//! | nested.binson      | Objects and arrays three levels deep          |
//! | truncated.binson   | scalars.binson cut short (invalid on purpose) |

#![allow(clippy::pedantic)]

use std::fs;
use std::path::Path;

use binson_encoder::Encoder;

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fixtures_dir = manifest_dir.join("tests/fixtures");
    fs::create_dir_all(&fixtures_dir).expect("create fixtures dir");

    write_empty(&fixtures_dir);
    write_scalars(&fixtures_dir);
    write_nested(&fixtures_dir);
    write_truncated(&fixtures_dir);

    println!("All fixtures written to {}", fixtures_dir.display());
}

fn encode_with(build: impl FnOnce(&mut Encoder<&mut Vec<u8>>)) -> Vec<u8> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    build(&mut enc);
    enc.flush().expect("flush");
    drop(enc);
    out
}

fn write_empty(dir: &Path) {
    let bytes = encode_with(|e| {
        e.begin_object().unwrap();
        e.end_object().unwrap();
    });
    fs::write(dir.join("empty.binson"), bytes).expect("write empty.binson");
}

fn write_scalars(dir: &Path) {
    let bytes = encode_with(|e| {
        e.begin_object().unwrap();
        e.write_field_name("flag").unwrap();
        e.write_bool(true).unwrap();
        e.write_field_name("count").unwrap();
        e.write_integer(1_234_567).unwrap();
        e.write_field_name("ratio").unwrap();
        e.write_double(0.125).unwrap();
        e.write_field_name("label").unwrap();
        e.write_string("fixture").unwrap();
        e.write_field_name("blob").unwrap();
        e.write_bytes(&[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();
        e.end_object().unwrap();
    });
    fs::write(dir.join("scalars.binson"), bytes).expect("write scalars.binson");
}

fn write_nested(dir: &Path) {
    let bytes = encode_with(|e| {
        e.begin_object().unwrap();
        e.write_field_name("meta").unwrap();
        e.begin_object().unwrap();
        e.write_field_name("tags").unwrap();
        e.begin_array().unwrap();
        e.write_string("alpha").unwrap();
        e.write_string("beta").unwrap();
        e.begin_array().unwrap();
        e.write_integer(1).unwrap();
        e.write_integer(2).unwrap();
        e.end_array().unwrap();
        e.end_array().unwrap();
        e.end_object().unwrap();
        e.write_field_name("id").unwrap();
        e.write_integer(42).unwrap();
        e.end_object().unwrap();
    });
    fs::write(dir.join("nested.binson"), bytes).expect("write nested.binson");
}

fn write_truncated(dir: &Path) {
    let mut bytes = encode_with(|e| {
        e.begin_object().unwrap();
        e.write_field_name("flag").unwrap();
        e.write_bool(true).unwrap();
        e.end_object().unwrap();
    });
    bytes.truncate(bytes.len() - 2);
    fs::write(dir.join("truncated.binson"), bytes).expect("write truncated.binson");
}
