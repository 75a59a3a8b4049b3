/// Returns the stored form of a field value.
///
/// The value is cut to at most `max_len - 1` characters, then leading and
/// trailing whitespace is removed. `max_len` counts one slot for a
/// terminator, so a `max_len` of 0 or 1 always yields an empty string.
pub fn normalize(raw: &str, max_len: usize) -> String {
    let cap = max_len.saturating_sub(1);
    let truncated = match raw.char_indices().nth(cap) {
        Some((end, _)) => &raw[..end],
        None => raw,
    };
    truncated.trim_matches(is_space).to_string()
}

/// Whitespace as classified by C `isspace` in the "C" locale.
///
/// Unlike [char::is_ascii_whitespace] this includes vertical tab.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
