/// Implementation of `binson validate`.
///
/// Performs a full structural walk of the document, descending into
/// every container and decoding every scalar, then checks that nothing
/// follows the root object's end marker. Reports a series of success
/// checkmarks (`✓`) or a single diagnostic failure line (`✗`). The
/// command exits with code 0 on a valid file and code 1 on any error
/// (the main dispatcher in `main.rs` converts `Err` to exit code 1).
///
/// # Success output
///
/// ```text
/// ✓ Root: Object begin and end markers balanced
/// ✓ Items: 7 fields, 11 values decoded without error
/// ✓ Depth: maximum nesting 3
/// ✓ Trailing: no bytes after root end
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: field name must be a String item, got signature 0x10
/// ```
///
/// A file that walks cleanly is structurally valid: every signature
/// byte known, every length in range, every String UTF-8, every
/// container closed. Schema-level validity (which fields a document
/// should contain) is the application's concern, not this command's.
use std::fs::File;
use std::io::Read;

use anyhow::{Context, Result, anyhow};
use binson_decoder::{DecodeError, Decoder, Item};

use crate::ValidateArgs;

/// Totals accumulated during the walk.
#[derive(Default)]
struct WalkStats {
    fields: u64,
    values: u64,
    max_depth: usize,
}

/// Run the `binson validate` command.
///
/// Prints a validation report to stdout and returns `Ok(())` on
/// success. On any structural error, prints a `✗` diagnostic to stdout
/// and returns `Err`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if the document
/// fails any structural check.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;
    let mut dec = Decoder::new(file);

    let stats = match walk(&mut dec) {
        Ok(stats) => stats,
        Err(e) => {
            println!("✗ Error: {}", diagnostic(&e));
            return Err(anyhow!("validation failed"));
        }
    };

    let mut reader = dec.into_inner();
    let mut probe = [0u8; 1];
    let trailing = reader.read(&mut probe)? != 0;
    if trailing {
        println!("✗ Error: trailing data after the root object's end marker");
        return Err(anyhow!("validation failed"));
    }

    println!("✓ Root: Object begin and end markers balanced");
    println!(
        "✓ Items: {} field{}, {} value{} decoded without error",
        stats.fields,
        if stats.fields == 1 { "" } else { "s" },
        stats.values,
        if stats.values == 1 { "" } else { "s" },
    );
    println!("✓ Depth: maximum nesting {}", stats.max_depth);
    println!("✓ Trailing: no bytes after root end");
    Ok(())
}

/// Which container kind the walker is currently inside.
#[derive(Clone, Copy)]
enum Ctx {
    Object,
    Array,
}

/// Exhaustive walk over the whole document. Every container is entered
/// rather than skipped, so every byte of the stream passes through full
/// decoding.
fn walk<R: Read>(dec: &mut Decoder<R>) -> Result<WalkStats, DecodeError> {
    let mut stats = WalkStats::default();
    let mut stack: Vec<Ctx> = vec![Ctx::Object];
    stats.max_depth = 1;

    while let Some(&ctx) = stack.last() {
        let item = match ctx {
            Ctx::Object => match dec.next_field()? {
                Some(field) => {
                    stats.fields += 1;
                    Some(field.value)
                }
                None => None,
            },
            Ctx::Array => dec.next_array_value()?,
        };

        match item {
            Some(Item::Object) => {
                dec.enter_object()?;
                stack.push(Ctx::Object);
                stats.max_depth = stats.max_depth.max(stack.len());
                stats.values += 1;
            }
            Some(Item::Array) => {
                dec.enter_array()?;
                stack.push(Ctx::Array);
                stats.max_depth = stats.max_depth.max(stack.len());
                stats.values += 1;
            }
            Some(_) => stats.values += 1,
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

    Ok(stats)
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `DecodeError` into a diagnostic line. Format errors pass
/// through their own Display text; usage and poison variants cannot
/// occur during a fresh walk but are spelled out anyway rather than
/// panicking on them.
fn diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::UnexpectedEof => "file ends inside an item (truncated document)".to_string(),
        DecodeError::Io(inner) => format!("read failed: {inner}"),
        other => other.to_string(),
    }
}
