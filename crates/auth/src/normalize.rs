//! Operator canonicalization.
//!
//! Expressions may spell the logical operators singly (`a | b`, `a & b`) or
//! doubled (`a || b`, `a && b`). Normalization rewrites every maximal run of
//! `|` or `&` into the two-character form, so a single character is expanded,
//! a pair is left alone and a run of three or more collapses to two. Nothing
//! else in the text is touched; whitespace is handled by the tokenizer.

/// Canonicalize logical operators to `||` / `&&`.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '|' | '&' => {
                while chars.peek() == Some(&c) {
                    chars.next();
                }
                out.push(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}
