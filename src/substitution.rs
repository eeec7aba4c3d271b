//! Token Scanner & Substitution Resolver
//!
//! Finds placeholder tokens in report text and replaces them with the
//! values the user picked in the generated form.
//!
//! Three token shapes:
//! - `{Name}`        reference to a variable, looked up by exact title
//! - `{a//b//c}`     inline option group, one choice among the literals
//! - `$`             measurement placeholder, free-text input
//!
//! Unmatched tokens are left verbatim. Resolution is not idempotent when a
//! resolved value itself contains braces; the composer resolves exactly once
//! per fill-in action.

use std::ops::Range;

use crate::localvar;
use crate::models::Variable;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range of the whole token (including braces / the `$`)
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Variable(String),
    OptionGroup(Vec<String>),
    Measurement,
}

/// Scan a text blob for placeholder tokens, in document order.
///
/// An unterminated `{` is plain text. Embedded local-variable JSON markers
/// are not tokens and are skipped wholesale.
pub fn scan(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                if localvar::starts_marker(&text[i..]) {
                    // Skip the whole JSON marker, or the brace if unbalanced
                    i += localvar::marker_len(&text[i..]).unwrap_or(1);
                    continue;
                }
                match text[i + 1..].find(['{', '}']) {
                    Some(off) if text.as_bytes()[i + 1 + off] == b'}' => {
                        let inner = &text[i + 1..i + 1 + off];
                        let end = i + 1 + off + 1;
                        let kind = if inner.contains("//") {
                            TokenKind::OptionGroup(
                                inner.split("//").map(str::to_string).collect(),
                            )
                        } else {
                            TokenKind::Variable(inner.to_string())
                        };
                        tokens.push(Token { kind, range: i..end });
                        i = end;
                    }
                    // `{` followed by another `{` or never closed: plain text
                    _ => i += 1,
                }
            }
            b'$' => {
                tokens.push(Token {
                    kind: TokenKind::Measurement,
                    range: i..i + 1,
                });
                i += 1;
            }
            _ => i += 1,
        }
    }
    tokens
}

/// Join selected values with a delimiter between all but the last pair and
/// the last delimiter before the final value.
///
/// Zero values yield an empty string; a single value is returned unmodified.
pub fn join_values(values: &[String], delimiter: &str, last_delimiter: &str) -> String {
    match values {
        [] => String::new(),
        [one] => one.clone(),
        [head @ .., last] => format!("{}{}{}", head.join(delimiter), last_delimiter, last),
    }
}

/// Resolve a variable against the values the user selected.
pub fn resolve_variable(variable: &Variable, selected: &[String]) -> String {
    let delimiter = variable.delimiter.as_deref().unwrap_or(", ");
    let last_delimiter = variable.last_delimiter.as_deref().unwrap_or(delimiter);
    join_values(selected, delimiter, last_delimiter)
}

/// Replace each answered token with its resolved value.
///
/// `answers` pairs tokens from [`scan`] (over this exact `text`) with the
/// resolved replacement; `None` leaves the token verbatim.
pub fn apply_answers(text: &str, answers: &[(Token, Option<String>)]) -> String {
    let ranges: Vec<_> = answers
        .iter()
        .map(|(token, answer)| (token.range.clone(), answer.clone()))
        .collect();
    replace_ranges(text, &ranges)
}

/// Replace answered byte ranges, back to front so earlier ranges stay valid.
/// Ranges must be ascending and non-overlapping (as produced by the scans).
pub fn replace_ranges(text: &str, answers: &[(Range<usize>, Option<String>)]) -> String {
    let mut out = text.to_string();
    for (range, answer) in answers.iter().rev() {
        if let Some(value) = answer {
            out.replace_range(range.clone(), value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ControlKind, VariableValue};

    fn var(title: &str, delim: Option<&str>, last: Option<&str>) -> Variable {
        Variable {
            id: 1,
            title: title.to_string(),
            control: ControlKind::CheckboxGroup,
            values: vec![VariableValue {
                description: "A".into(),
                value: "A".into(),
            }],
            delimiter: delim.map(str::to_string),
            last_delimiter: last.map(str::to_string),
        }
    }

    #[test]
    fn test_scan_classifies_tokens() {
        let tokens = scan("Fígado {Ecotextura} medindo $ cm {normal//aumentado}.");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Variable("Ecotextura".into()));
        assert_eq!(tokens[1].kind, TokenKind::Measurement);
        assert_eq!(
            tokens[2].kind,
            TokenKind::OptionGroup(vec!["normal".into(), "aumentado".into()])
        );
    }

    #[test]
    fn test_scan_unterminated_brace_is_text() {
        assert!(scan("texto com { aberto sem fim").is_empty());
    }

    #[test]
    fn test_scan_skips_local_variable_marker() {
        let text = r#"Pré {"tipo":"variavelLocal","controle":"radio","titulo":"X","valores":[]} pós {A}"#;
        let tokens = scan(text);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Variable("A".into()));
    }

    #[test]
    fn test_join_zero_and_one() {
        assert_eq!(join_values(&[], ", ", " e "), "");
        assert_eq!(join_values(&["A".into()], ", ", " e "), "A");
    }

    #[test]
    fn test_join_many_uses_last_delimiter() {
        let vals: Vec<String> = vec!["A".into(), "B".into(), "C".into()];
        assert_eq!(join_values(&vals, ", ", " and "), "A, B and C");
    }

    #[test]
    fn test_resolve_variable_defaults() {
        let v = var("A", None, None);
        let vals: Vec<String> = vec!["x".into(), "y".into()];
        assert_eq!(resolve_variable(&v, &vals), "x, y");
    }

    #[test]
    fn test_resolve_variable_configured_delimiters() {
        let v = var("A", Some(", "), Some(" e "));
        let vals: Vec<String> = vec!["x".into(), "y".into(), "z".into()];
        assert_eq!(resolve_variable(&v, &vals), "x, y e z");
    }

    #[test]
    fn test_unanswered_token_left_verbatim() {
        let text = "antes {A} depois";
        let tokens = scan(text);
        let answers: Vec<_> = tokens.into_iter().map(|t| (t, None)).collect();
        assert_eq!(apply_answers(text, &answers), "antes {A} depois");
    }

    #[test]
    fn test_apply_answers_mixed() {
        let text = "{A} mede $ cm, aspecto {liso//irregular}";
        let tokens = scan(text);
        let answers: Vec<_> = tokens
            .into_iter()
            .map(|t| {
                let v = match &t.kind {
                    TokenKind::Variable(_) => Some("Rim direito".to_string()),
                    TokenKind::Measurement => Some("9,8".to_string()),
                    TokenKind::OptionGroup(_) => None,
                };
                (t, v)
            })
            .collect();
        assert_eq!(
            apply_answers(text, &answers),
            "Rim direito mede 9,8 cm, aspecto {liso//irregular}"
        );
    }
}
