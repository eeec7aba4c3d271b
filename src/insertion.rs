//! Phrase Insertion
//!
//! Where a catalogued phrase lands when added to the report being composed:
//! anchor replacement when the phrase declares one and it is present,
//! otherwise one of five user-chosen insertion modes. After insertion the
//! phrase's find/replace pairs run sequentially over the whole document and
//! its conclusion is merged.

use std::ops::Range;

use crate::models::SubstitutionPair;
use crate::plural;

/// Insertion modes offered when no substitution anchor applies.
/// Each maps to a one-shot pending state in the composer that waits for the
/// corresponding DOM event before clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Append at document end
    Append,
    /// Wait for a click, insert at the clicked position
    ClickPoint,
    /// Insert at the current caret position
    AtCursor,
    /// Replace the current selection
    ReplaceSelection,
    /// Delete the current line and insert in its place
    ReplaceLine,
}

/// First step of inserting a phrase: anchored replacement, or a request for
/// the user to pick a mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Anchored(String),
    NeedsMode,
}

/// Try the phrase's substitution anchor. The mode modal is skipped entirely
/// when the anchor is declared and present.
pub fn place_phrase(report: &str, anchor: Option<&str>, base_text: &str) -> Placement {
    match anchor {
        Some(a) if !a.is_empty() && report.contains(a) => {
            Placement::Anchored(report.replacen(a, base_text, 1))
        }
        _ => Placement::NeedsMode,
    }
}

/// Append with a newline separator; an empty report takes the text as-is.
pub fn append(report: &str, text: &str) -> String {
    if report.is_empty() {
        text.to_string()
    } else {
        format!("{}\n{}", report, text)
    }
}

/// Insert at a byte offset, clamped to the document.
pub fn insert_at(report: &str, offset: usize, text: &str) -> String {
    let offset = clamp_boundary(report, offset);
    let mut out = report.to_string();
    out.insert_str(offset, text);
    out
}

/// Replace a byte range (the current selection) with the text.
pub fn replace_range(report: &str, range: Range<usize>, text: &str) -> String {
    let range = clamp_range(report, range);
    let mut out = report.to_string();
    out.replace_range(range, text);
    out
}

/// Delete the line containing `offset` and insert the text in its place.
pub fn replace_line_at(report: &str, offset: usize, text: &str) -> String {
    let offset = clamp_boundary(report, offset);
    let start = report[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = report[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(report.len());
    replace_range(report, start..end, text)
}

/// Apply a resolved mode. `caret` and `selection` come from the editor
/// surface at the moment the pending state fires.
pub fn apply_mode(
    report: &str,
    mode: InsertMode,
    caret: Option<usize>,
    selection: Option<Range<usize>>,
    text: &str,
) -> String {
    match mode {
        InsertMode::Append => append(report, text),
        InsertMode::ClickPoint | InsertMode::AtCursor => {
            insert_at(report, caret.unwrap_or(report.len()), text)
        }
        InsertMode::ReplaceSelection => match selection {
            Some(range) => replace_range(report, range, text),
            None => insert_at(report, caret.unwrap_or(report.len()), text),
        },
        InsertMode::ReplaceLine => replace_line_at(report, caret.unwrap_or(report.len()), text),
    }
}

/// Sequential find/replace over the whole document; order matters.
pub fn apply_substitutions(report: &str, pairs: &[SubstitutionPair]) -> String {
    let mut out = report.to_string();
    for pair in pairs {
        if !pair.find.is_empty() {
            out = out.replace(&pair.find, &pair.replace);
        }
    }
    out
}

/// Merge a conclusion into the report.
///
/// Replaces the tracked conclusion if one is recorded and still present;
/// otherwise appends, unless the exact text already occurs, in which case
/// the existing occurrence has its final word pluralized instead of being
/// duplicated. Returns the new report and the conclusion now tracked.
pub fn merge_conclusion(
    report: &str,
    tracked: Option<&str>,
    conclusion: &str,
) -> (String, Option<String>) {
    if conclusion.is_empty() {
        return (report.to_string(), tracked.map(str::to_string));
    }
    if let Some(prev) = tracked {
        if !prev.is_empty() && report.contains(prev) {
            return (
                report.replacen(prev, conclusion, 1),
                Some(conclusion.to_string()),
            );
        }
    }
    if report.contains(conclusion) {
        let pluralized = plural::pluralize_last_word(conclusion);
        return (
            report.replacen(conclusion, &pluralized, 1),
            Some(pluralized),
        );
    }
    (append(report, conclusion), Some(conclusion.to_string()))
}

/// Convert a UTF-16 code-unit offset (what textarea selection APIs report)
/// into a byte offset over the same text.
pub fn utf16_to_byte(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (i, c) in text.char_indices() {
        if units >= utf16_offset {
            return i;
        }
        units += c.len_utf16();
    }
    text.len()
}

/// Clamp a byte range to the document so it is always safe to slice.
///
/// Selection offsets can go stale when the report is rewritten underneath
/// them (anchored insertion, find/replace, form fill, dictation flush).
pub fn clamp_range(text: &str, range: Range<usize>) -> Range<usize> {
    let start = clamp_boundary(text, range.start);
    let end = clamp_boundary(text, range.end.max(start));
    start..end
}

/// Snap an arbitrary byte offset back to the nearest char boundary.
fn clamp_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_mode_scenario() {
        let report = "Texto inicial";
        let placed = place_phrase(report, None, "Fígado normal.");
        assert_eq!(placed, Placement::NeedsMode);
        let out = apply_mode(report, InsertMode::Append, None, None, "Fígado normal.");
        assert_eq!(out, "Texto inicial\nFígado normal.");
    }

    #[test]
    fn test_anchor_replaced_in_place() {
        let report = "Cabeçalho\nPLACEHOLDER\nRodapé";
        let placed = place_phrase(report, Some("PLACEHOLDER"), "Baço de dimensões normais.");
        assert_eq!(
            placed,
            Placement::Anchored("Cabeçalho\nBaço de dimensões normais.\nRodapé".to_string())
        );
    }

    #[test]
    fn test_anchor_missing_falls_back_to_mode() {
        let placed = place_phrase("Texto", Some("AUSENTE"), "x");
        assert_eq!(placed, Placement::NeedsMode);
    }

    #[test]
    fn test_insert_at_cursor() {
        let out = apply_mode("abcdef", InsertMode::AtCursor, Some(3), None, "XY");
        assert_eq!(out, "abcXYdef");
    }

    #[test]
    fn test_replace_selection() {
        let out = apply_mode("abcdef", InsertMode::ReplaceSelection, None, Some(1..4), "Z");
        assert_eq!(out, "aZef");
    }

    #[test]
    fn test_replace_line() {
        let out = apply_mode(
            "linha um\nlinha dois\nlinha três",
            InsertMode::ReplaceLine,
            Some(12),
            None,
            "nova linha",
        );
        assert_eq!(out, "linha um\nnova linha\nlinha três");
    }

    #[test]
    fn test_clamp_range_survives_stale_offsets() {
        // Selection captured before the report shrank
        assert_eq!(clamp_range("curto", 10..40), 5..5);
        assert_eq!(&"curto"[clamp_range("curto", 10..40)], "");
        // Offsets landing inside a multi-byte char snap back
        let text = "fígado";
        let clamped = clamp_range(text, 2..4);
        assert_eq!(clamped, 1..4);
        assert_eq!(&text[clamped], "íg");
        // Inverted ranges collapse instead of slicing backwards
        assert_eq!(clamp_range("abcdef", 4..2), 4..4);
    }

    #[test]
    fn test_utf16_offsets_with_accents() {
        // "fígado" — the í is 2 bytes but 1 UTF-16 unit
        let text = "fígado X";
        assert_eq!(utf16_to_byte(text, 0), 0);
        assert_eq!(utf16_to_byte(text, 2), 3);
        assert_eq!(utf16_to_byte(text, 7), 8);
        assert_eq!(utf16_to_byte(text, 99), text.len());
    }

    #[test]
    fn test_substitutions_are_sequential() {
        let pairs = vec![
            SubstitutionPair {
                find: "direito".into(),
                replace: "esquerdo".into(),
            },
            SubstitutionPair {
                find: "esquerdo".into(),
                replace: "ESQUERDO".into(),
            },
        ];
        // The second pair rewrites the output of the first
        assert_eq!(apply_substitutions("rim direito", &pairs), "rim ESQUERDO");
    }

    #[test]
    fn test_conclusion_replaces_tracked() {
        let (out, tracked) = merge_conclusion(
            "Laudo.\nConclusão antiga.",
            Some("Conclusão antiga."),
            "Conclusão nova.",
        );
        assert_eq!(out, "Laudo.\nConclusão nova.");
        assert_eq!(tracked.as_deref(), Some("Conclusão nova."));
    }

    #[test]
    fn test_conclusion_appends_when_untracked() {
        let (out, tracked) = merge_conclusion("Laudo.", None, "Exame normal.");
        assert_eq!(out, "Laudo.\nExame normal.");
        assert_eq!(tracked.as_deref(), Some("Exame normal."));
    }

    #[test]
    fn test_duplicate_conclusion_pluralizes() {
        let (out, tracked) = merge_conclusion(
            "Laudo.\nPresença de cisto.",
            None,
            "Presença de cisto.",
        );
        assert_eq!(out, "Laudo.\nPresença de cistos.");
        assert_eq!(tracked.as_deref(), Some("Presença de cistos."));
    }
}
