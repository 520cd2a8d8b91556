#![no_main]

use binson_decoder::{DecodeError, Decoder, Item};
use libfuzzer_sys::fuzz_target;

// Fuzz target: full decoder walk over arbitrary bytes.
//
// Walks the input as a Binson document, entering every container.
// Catches bugs in:
// - Signature byte dispatch
// - Length prefix validation (negative, oversized)
// - UTF-8 validation of names and string values
// - Truncation handling at every byte position
// - State machine transitions under hostile sequencing
//
// Any outcome other than Ok or a DecodeError (panic, abort, OOM,
// unbounded recursion) is a finding. Depth is capped so that inputs
// nesting containers millions deep exercise the skip path instead of
// growing the walk stack without bound.
fuzz_target!(|data: &[u8]| {
    let _ = walk(data);
});

const MAX_DEPTH: usize = 256;

enum Ctx {
    Object,
    Array,
}

fn walk(data: &[u8]) -> Result<(), DecodeError> {
    let mut dec = Decoder::new(data);
    let mut stack = vec![Ctx::Object];
    while let Some(ctx) = stack.last() {
        let item = match ctx {
            Ctx::Object => dec.next_field()?.map(|f| f.value),
            Ctx::Array => dec.next_array_value()?,
        };
        match item {
            Some(Item::Object) if stack.len() < MAX_DEPTH => {
                dec.enter_object()?;
                stack.push(Ctx::Object);
            }
            Some(Item::Array) if stack.len() < MAX_DEPTH => {
                dec.enter_array()?;
                stack.push(Ctx::Array);
            }
            // At the cap: leave the container pending so the next read
            // on the parent skips it with the iterative discard loop.
            Some(_) => {}
            None => {
                stack.pop();
                match stack.last() {
                    Some(Ctx::Object) => dec.up_to_object()?,
                    Some(Ctx::Array) => dec.up_to_array()?,
                    None => {}
                }
            }
        }
    }
    Ok(())
}
