/// Canonicalize a survey slug or question key for matching.
///
/// Historical records stored the same survey under `board-evaluation`,
/// `board_evaluation`, and mixed-case variants, so equality checks on the
/// raw string are never safe. Normalization keeps only ASCII alphanumerics
/// and lowercases them; the mapping is intentionally many-to-one.
pub fn normalize_slug(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}
