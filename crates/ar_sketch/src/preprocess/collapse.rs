//! Brace collapsing.
//!
//! Drops the interior of every brace-delimited block so nested statement
//! bodies cannot be mistaken for top-level declarations. The braces of
//! each top-level pair are kept.

/// Erase the contents of every top-level `{}` pair.
///
/// Text at depth 0 is copied, including the `{` that opens a block. A `}`
/// is copied when it brings the depth back to 0; a stray `}` at depth 0 is
/// copied as ordinary text and the depth stays at 0.
///
/// With `leak_nested_closers` every `}` is copied whatever the depth, and a
/// stray `}` drives the depth negative until a matching `{` comes along.
/// This reproduces older output byte for byte.
pub fn collapse_braces(source: &str, leak_nested_closers: bool) -> String {
    let mut out = String::with_capacity(source.len());
    let mut depth: i64 = 0;

    for c in source.chars() {
        if depth == 0 {
            out.push(c);
        }
        match c {
            '{' => depth += 1,
            '}' if leak_nested_closers => {
                depth -= 1;
                out.push(c);
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    out.push(c);
                }
            }
            _ => {}
        }
    }

    out
}
