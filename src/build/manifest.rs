//! Manifest line extraction.
//!
//! The manifest is JSON-lines, but only three string fields matter, so the
//! extractor is a deliberate substring scan rather than a JSON parser: find
//! `"key":`, skip blanks, read one quoted string. A backslash passes the
//! following character through literally (`\"` yields `"`; the escape
//! `\u0041` comes out as the literal characters `u0041` rather than `A`).
//! Records with nested quotes or exotic escapes may therefore be mis-read;
//! the crawler producing the manifest never emits those.

/// Extract the quoted string value of `key` from a manifest line.
///
/// Returns `None` when the key is absent or not followed by a quoted
/// string. An unterminated string yields everything up to end of line.
pub fn extract_json_string(line: &str, key: &str) -> Option<String> {
    let pattern = format!("\"{}\":", key);
    let start = line.find(&pattern)? + pattern.len();
    let mut chars = line[start..].chars();

    let mut next = chars.next();
    while matches!(next, Some(' ') | Some('\t')) {
        next = chars.next();
    }
    if next != Some('"') {
        return None;
    }

    let mut value = String::new();
    loop {
        match chars.next() {
            None | Some('"') => break,
            Some('\\') => {
                if let Some(escaped) = chars.next() {
                    value.push(escaped);
                }
            }
            Some(c) => value.push(c),
        }
    }
    Some(value)
}

/// One manifest record: the corpus filename stem plus display attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub doc_id: String,
    pub title: String,
    pub url: String,
}

impl ManifestRecord {
    /// Parse one manifest line. `doc_id` is required; a missing `title`
    /// falls back to the doc id and a missing `url` to the empty string.
    pub fn from_line(line: &str) -> Option<Self> {
        let doc_id = extract_json_string(line, "doc_id")?;
        let title = extract_json_string(line, "title")
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| doc_id.clone());
        let url = extract_json_string(line, "url").unwrap_or_default();
        Some(Self { doc_id, title, url })
    }
}
