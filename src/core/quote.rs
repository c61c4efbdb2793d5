//! Helpers for values that the model builder expects wrapped in double quotes.

const QUOTE: char = '"';

/// Ensure `s` starts and ends with a double quote, adding only the missing side(s).
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    if !s.starts_with(QUOTE) {
        quoted.push(QUOTE);
    }
    quoted.push_str(s);
    if !s.ends_with(QUOTE) {
        quoted.push(QUOTE);
    }
    quoted
}

/// Strip at most one leading and one trailing double quote. Inner quotes are untouched.
pub fn unquote(s: &str) -> &str {
    let s = s.strip_prefix(QUOTE).unwrap_or(s);
    s.strip_suffix(QUOTE).unwrap_or(s)
}
