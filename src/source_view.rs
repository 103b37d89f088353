//! Source view primitives
//!
//! basm source is ASCII, so byte offset and character index coincide; these
//! helpers work directly on `&str` rather than wrapping a position-tracking
//! cursor type — the translator's per-line loop owns the only position
//! bookkeeping this crate needs (the current line number), so there is no
//! whole-file cursor analogous to a lexer cursor over multiple lines.

/// Strip a trailing `;` comment, if any. basm comments run to end of line.
pub fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Trim ASCII whitespace from both ends.
pub fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Trim ASCII whitespace from the start only.
pub fn trim_start(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_ascii_whitespace())
}

/// Split off the first whitespace-delimited word, returning (word, rest).
/// `rest` has its leading whitespace trimmed.
pub fn split_first_word(s: &str) -> (&str, &str) {
    let s = trim_start(s);
    match s.find(|c: char| c.is_ascii_whitespace()) {
        Some(idx) => (&s[..idx], trim_start(&s[idx..])),
        None => (s, ""),
    }
}
