//! Input Sanitization
//!
//! Free-text fields (participant names, message recipients, bodies, and the
//! `user` identity header) are HTML-stripped and trimmed before any
//! validation, uniqueness check, or persistence. Comparisons elsewhere in
//! the crate are always against the normalized value.

/// Strip HTML tags from the input and trim surrounding whitespace.
///
/// Anything between `<` and the next `>` is removed, including the brackets.
/// An unterminated tag swallows the rest of the input. A bare `>` outside a
/// tag is ordinary text and survives.
pub fn clean(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    out.trim().to_string()
}
