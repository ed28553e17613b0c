//! Label → display glyph lookup.

const EMOJI: [(&str, &str); 10] = [
    ("anger", "😠"),
    ("disgust", "🤮"),
    ("fear", "😨😱"),
    ("happy", "🤗"),
    ("joy", "😂"),
    ("neutral", "😐"),
    ("sad", "😔"),
    ("sadness", "😔"),
    ("shame", "😳"),
    ("surprise", "😮"),
];

/// Glyph for `label`, or `""` when the label is not in the table.
///
/// Matching is exact; `"Joy"` is not `"joy"`.
pub fn emoji_for(label: &str) -> &'static str {
    EMOJI
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, glyph)| *glyph)
        .unwrap_or("")
}
