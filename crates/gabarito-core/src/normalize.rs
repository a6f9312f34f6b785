use crate::model::Line;

/// Split raw extracted text into trimmed, non-empty lines.
///
/// Each kept line remembers its position in the raw document so later
/// diagnostics can point back at the source. Empty input yields an empty
/// vec; there is no failure mode.
pub fn normalize(raw: &str) -> Vec<Line> {
    raw.lines()
        .enumerate()
        .filter_map(|(index, segment)| {
            let text = segment.trim();
            if text.is_empty() {
                None
            } else {
                Some(Line {
                    index,
                    text: text.to_string(),
                })
            }
        })
        .collect()
}
