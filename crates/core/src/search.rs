//! Substring search helpers for the listing engine.
//!
//! Search terms are matched with SQL `LIKE ... ESCAPE '\'`, so the
//! wildcard characters a user types are matched literally.

/// Escape character used in every `LIKE` clause built from user input.
pub const LIKE_ESCAPE: char = '\\';

/// Treat an absent or empty term as "no filter".
pub fn normalize_term(term: Option<String>) -> Option<String> {
    term.filter(|t| !t.is_empty())
}

/// Build a `%term%` pattern with `%`, `_` and the escape character escaped.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
