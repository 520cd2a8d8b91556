/// Implementation of `binson inspect`.
///
/// Streams through the file with the cursor decoder and prints an
/// indented tree of every field and value. Containers are descended
/// into as they are met, so the whole document is rendered in stream
/// order without ever materializing it in memory.
///
/// # Output format
///
/// ```text
/// {
///   "cid": 4
///   "z": {
///     "name": "Kim"
///   }
///   "tags": [
///     "a"
///     "b"
///   ]
///   "blob": 0x68656c6c6f (5 bytes)
/// }
/// ```
use std::fmt::Write as _;
use std::fs::File;

use anyhow::{Context, Result};
use binson_decoder::{Decoder, Item};

use crate::InspectArgs;

/// Which container kind the walker is currently inside. Mirrors the
/// nesting of the document; the decoder itself is depth-oblivious.
#[derive(Clone, Copy)]
enum Ctx {
    Object,
    Array,
}

/// Run the `binson inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the document is
/// structurally invalid (malformed signature, truncated item, etc.).
pub fn run(args: &InspectArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;
    let mut dec = Decoder::new(file);
    let mut stack: Vec<Ctx> = vec![Ctx::Object];

    println!("{{");
    while let Some(&ctx) = stack.last() {
        let indent = "  ".repeat(stack.len());
        match ctx {
            Ctx::Object => match dec.next_field()? {
                Some(field) => match field.value {
                    Item::Object => {
                        println!("{indent}{:?}: {{", field.name);
                        dec.enter_object()?;
                        stack.push(Ctx::Object);
                    }
                    Item::Array => {
                        println!("{indent}{:?}: [", field.name);
                        dec.enter_array()?;
                        stack.push(Ctx::Array);
                    }
                    scalar => {
                        println!("{indent}{:?}: {}", field.name, render(&scalar, args.truncate));
                    }
                },
                None => close(&mut dec, &mut stack, "}")?,
            },
            Ctx::Array => match dec.next_array_value()? {
                Some(Item::Object) => {
                    println!("{indent}{{");
                    dec.enter_object()?;
                    stack.push(Ctx::Object);
                }
                Some(Item::Array) => {
                    println!("{indent}[");
                    dec.enter_array()?;
                    stack.push(Ctx::Array);
                }
                Some(scalar) => println!("{indent}{}", render(&scalar, args.truncate)),
                None => close(&mut dec, &mut stack, "]")?,
            },
        }
    }

    Ok(())
}

/// Pop the finished container, print its closing bracket at the parent
/// indent, and reposition the decoder in the parent (if any).
fn close<R: std::io::Read>(
    dec: &mut Decoder<R>,
    stack: &mut Vec<Ctx>,
    bracket: &str,
) -> Result<()> {
    stack.pop();
    println!("{}{bracket}", "  ".repeat(stack.len()));
    match stack.last() {
        Some(Ctx::Object) => dec.up_to_object()?,
        Some(Ctx::Array) => dec.up_to_array()?,
        None => {}
    }
    Ok(())
}

// ── Value formatting ──────────────────────────────────────────────────────────

/// Render one scalar for display, truncating long Strings and Bytes.
fn render(item: &Item, truncate: usize) -> String {
    match item {
        Item::Boolean(b) => b.to_string(),
        Item::Integer(i) => i.to_string(),
        // {:?} keeps a trailing .0 on whole values, so doubles never
        // read as integers.
        Item::Double(d) => format!("{d:?}"),
        Item::String(s) => {
            if s.chars().count() <= truncate {
                format!("{s:?}")
            } else {
                let head: String = s.chars().take(truncate).collect();
                format!("{head:?}… ({} chars)", s.chars().count())
            }
        }
        Item::Bytes(b) => {
            let shown = &b[..b.len().min(truncate)];
            let hex = shown.iter().fold(
                String::with_capacity(2 + shown.len() * 2),
                |mut s, byte| {
                    let _ = write!(s, "{byte:02x}");
                    s
                },
            );
            let ellipsis = if b.len() > truncate { "…" } else { "" };
            format!("0x{hex}{ellipsis} ({} bytes)", b.len())
        }
        // Containers are descended into by the caller, never rendered.
        Item::Array => "[…]".to_string(),
        Item::Object => "{…}".to_string(),
    }
}
