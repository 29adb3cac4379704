/// Trim whitespace (and a byte-order mark) + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Parse an integer field after `clean_str`, accepting an optional leading `+`.
pub fn parse_int<T: std::str::FromStr>(raw: &str) -> Option<T> {
    let s = clean_str(raw);
    let s = s.strip_prefix('+').unwrap_or(s);
    s.parse::<T>().ok()
}
