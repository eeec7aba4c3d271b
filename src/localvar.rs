//! Local-Variable Marker Codec
//!
//! A phrase's stored text may embed self-contained variable definitions as
//! one-line JSON objects (`{"tipo":"variavelLocal",...}`). The user never
//! sees the raw JSON: the text is parsed into a segment document where each
//! marker keeps its exact source JSON, and the display form `[LOCAL: Title]`
//! is derived from the segments on demand. Persisting re-emits the stored
//! JSON byte-identical, so the display round-trip cannot lose a definition.

use crate::models::LocalVariable;

/// Marker start sentinels: canonical JSON, plus a tolerated legacy variant
/// with unquoted keys.
const SENTINELS: &[&str] = &["{\"tipo\":\"variavelLocal\"", "{tipo:\"variavelLocal\""];

/// One piece of a phrase text: literal text or an embedded local variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    Marker {
        /// Exact source bytes of the JSON object, re-emitted on persistence
        raw: String,
        def: LocalVariable,
    },
}

/// Whether `text` begins with a local-variable marker sentinel.
pub fn starts_marker(text: &str) -> bool {
    SENTINELS.iter().any(|s| text.starts_with(s))
}

/// Byte length of the balanced marker object at the start of `text`.
///
/// Brace-depth scan honoring quoted strings and backslash escapes. Returns
/// `None` when the braces never balance.
pub fn marker_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a text blob into segments. A sentinel whose braces never balance or
/// whose JSON fails to parse stays literal text.
pub fn parse_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(start) = find_sentinel(rest) else {
            plain.push_str(rest);
            break;
        };
        let candidate = &rest[start..];
        match marker_len(candidate).and_then(|len| {
            let raw = &candidate[..len];
            parse_marker_json(raw).map(|def| (len, raw.to_string(), def))
        }) {
            Some((len, raw, def)) => {
                plain.push_str(&rest[..start]);
                if !plain.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut plain)));
                }
                segments.push(Segment::Marker { raw, def });
                rest = &candidate[len..];
            }
            None => {
                // Keep the sentinel byte and keep scanning after it
                plain.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
        }
    }
    if !plain.is_empty() {
        segments.push(Segment::Text(plain));
    }
    segments
}

fn find_sentinel(text: &str) -> Option<usize> {
    SENTINELS.iter().filter_map(|s| text.find(s)).min()
}

fn parse_marker_json(raw: &str) -> Option<LocalVariable> {
    let normalized = if raw.starts_with(SENTINELS[1]) {
        quote_bare_keys(raw)
    } else {
        raw.to_string()
    };
    serde_json::from_str(&normalized).ok()
}

/// Quote unquoted object keys in the tolerated legacy variant.
fn quote_bare_keys(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    let mut expect_key = false;
    let mut in_bare_key = false;

    for c in raw.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                expect_key = false;
                out.push(c);
            }
            '{' | ',' => {
                expect_key = true;
                out.push(c);
            }
            ':' => {
                if in_bare_key {
                    out.push('"');
                    in_bare_key = false;
                }
                out.push(c);
            }
            c if expect_key && (c.is_alphanumeric() || c == '_') => {
                out.push('"');
                out.push(c);
                expect_key = false;
                in_bare_key = true;
            }
            c if c.is_whitespace() => out.push(c),
            _ => {
                expect_key = false;
                out.push(c);
            }
        }
    }
    out
}

/// Render segments for display: markers become `[LOCAL: <label-or-title>]`.
pub fn display_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| match seg {
            Segment::Text(t) => t.clone(),
            Segment::Marker { def, .. } => display_tag(def),
        })
        .collect()
}

/// Render segments for persistence: markers re-emit their exact source JSON.
pub fn persisted_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| match seg {
            Segment::Text(t) => t.as_str(),
            Segment::Marker { raw, .. } => raw.as_str(),
        })
        .collect()
}

/// Byte ranges of the markers embedded in `text`, for the fill-in form.
pub fn marker_ranges(text: &str) -> Vec<(std::ops::Range<usize>, LocalVariable)> {
    let mut ranges = Vec::new();
    let mut offset = 0;
    for segment in parse_segments(text) {
        match segment {
            Segment::Text(t) => offset += t.len(),
            Segment::Marker { raw, def } => {
                ranges.push((offset..offset + raw.len(), def));
                offset += raw.len();
            }
        }
    }
    ranges
}

/// Display tag for a local-variable definition.
pub fn display_tag(def: &LocalVariable) -> String {
    format!("[LOCAL: {}]", def.display_label())
}

/// Build a marker segment from a fresh definition (single-line JSON).
pub fn make_marker(def: LocalVariable) -> Segment {
    let raw = serde_json::to_string(&def).unwrap_or_default();
    Segment::Marker { raw, def }
}

/// Re-merge an edited display text against the previous segments.
///
/// Each occurrence of a known display tag binds to the next unconsumed
/// marker carrying that tag; everything else is literal text. A tag typed by
/// hand with no matching marker therefore stays literal, which is the only
/// path left where a tag can be persisted verbatim.
pub fn merge_edits(edited: &str, previous: &[Segment]) -> Vec<Segment> {
    let mut remaining: Vec<&Segment> = previous
        .iter()
        .filter(|s| matches!(s, Segment::Marker { .. }))
        .collect();
    let mut segments = Vec::new();
    let mut rest = edited;

    while !rest.is_empty() {
        let hit = remaining
            .iter()
            .enumerate()
            .filter_map(|(idx, seg)| match seg {
                Segment::Marker { def, .. } => rest.find(&display_tag(def)).map(|pos| {
                    (pos, idx, display_tag(def).len())
                }),
                Segment::Text(_) => None,
            })
            .min_by_key(|(pos, _, _)| *pos);

        match hit {
            Some((pos, idx, tag_len)) => {
                if pos > 0 {
                    segments.push(Segment::Text(rest[..pos].to_string()));
                }
                segments.push(remaining.remove(idx).clone());
                rest = &rest[pos + tag_len..];
            }
            None => {
                segments.push(Segment::Text(rest.to_string()));
                break;
            }
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ControlKind, VariableValue};

    const RAW: &str = r#"{"tipo":"variavelLocal","controle":"radio","titulo":"Lado","valores":[{"descricao":"Direito","valor":"direito"},{"descricao":"Esquerdo","valor":"esquerdo"}]}"#;

    #[test]
    fn test_marker_len_honors_strings() {
        let text = r#"{"a":"fech}a{da","b":{"c":1}} resto"#;
        assert_eq!(marker_len(text), Some(text.len() - " resto".len()));
    }

    #[test]
    fn test_marker_len_unbalanced() {
        assert_eq!(marker_len(r#"{"a": {"b": 1}"#), None);
    }

    #[test]
    fn test_parse_and_display() {
        let text = format!("Rim {} sem alterações.", RAW);
        let segments = parse_segments(&text);
        assert_eq!(segments.len(), 3);
        assert_eq!(
            display_text(&segments),
            "Rim [LOCAL: Lado] sem alterações."
        );
    }

    #[test]
    fn test_persist_round_trip_is_byte_identical() {
        let text = format!("Antes {} meio {} fim", RAW, RAW);
        let segments = parse_segments(&text);
        assert_eq!(persisted_text(&segments), text);
    }

    #[test]
    fn test_make_marker_round_trip() {
        let def = LocalVariable {
            tipo: "variavelLocal".into(),
            controle: ControlKind::CheckboxGroup,
            titulo: "Achados".into(),
            valores: vec![VariableValue {
                description: "Cisto".into(),
                value: "cisto".into(),
            }],
            label: Some("Achados renais".into()),
            delimitador: Some(", ".into()),
            ultimoDelimitador: Some(" e ".into()),
        };
        let marker = make_marker(def.clone());
        let Segment::Marker { raw, .. } = &marker else {
            panic!("expected marker");
        };
        let reparsed = parse_segments(raw);
        assert_eq!(reparsed, vec![marker.clone()]);
        assert_eq!(display_text(&reparsed), "[LOCAL: Achados renais]");
        assert_eq!(&persisted_text(&reparsed), raw);
    }

    #[test]
    fn test_marker_ranges_cover_source_bytes() {
        let text = format!("ab {} cd", RAW);
        let ranges = marker_ranges(&text);
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].0.clone()], RAW);
    }

    #[test]
    fn test_legacy_unquoted_variant() {
        let text = r#"{tipo:"variavelLocal",controle:"radio",titulo:"Lado",valores:[]}"#;
        let segments = parse_segments(text);
        assert_eq!(segments.len(), 1);
        match &segments[0] {
            Segment::Marker { raw, def } => {
                assert_eq!(raw, text);
                assert_eq!(def.titulo, "Lado");
            }
            other => panic!("expected marker, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_marker_stays_text() {
        let text = r#"x {"tipo":"variavelLocal","titulo": y"#;
        let segments = parse_segments(text);
        assert_eq!(segments, vec![Segment::Text(text.to_string())]);
    }

    #[test]
    fn test_merge_edits_rebinds_tags() {
        let text = format!("Rim {} fim.", RAW);
        let segments = parse_segments(&text);
        let edited = "Rim esquerdo [LOCAL: Lado] fim!";
        let merged = merge_edits(edited, &segments);
        assert_eq!(persisted_text(&merged), format!("Rim esquerdo {} fim!", RAW));
    }

    #[test]
    fn test_merge_edits_unknown_tag_stays_literal() {
        let merged = merge_edits("texto [LOCAL: Inventado] aqui", &[]);
        assert_eq!(
            persisted_text(&merged),
            "texto [LOCAL: Inventado] aqui"
        );
    }
}
