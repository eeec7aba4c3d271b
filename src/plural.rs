//! Portuguese Pluralizer
//!
//! Rule-based suffix pluralization with an exception table. Used by the
//! conclusion merge when the same conclusion sentence is inserted twice.

/// Irregular plurals that the suffix rules would get wrong
const EXCEPTIONS: &[(&str, &str)] = &[
    ("mês", "meses"),
    ("mal", "males"),
    ("cal", "cales"),
    ("cônsul", "cônsules"),
    ("mel", "méis"),
    ("fel", "féis"),
    ("cidadão", "cidadãos"),
    ("irmão", "irmãos"),
    ("mão", "mãos"),
    ("grão", "grãos"),
    ("órgão", "órgãos"),
    ("pão", "pães"),
    ("cão", "cães"),
    ("alemão", "alemães"),
];

/// Pluralize a single Portuguese word.
///
/// Case of the first letter is preserved for capitalized words; everything
/// else follows the lowercased form of the word.
pub fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();

    if let Some((_, plural)) = EXCEPTIONS.iter().find(|(sing, _)| *sing == lower) {
        return match_capitalization(word, plural);
    }

    let plural = apply_rules(&lower);
    match_capitalization(word, &plural)
}

fn apply_rules(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ão") {
        return format!("{}ões", stem);
    }
    if let Some(stem) = word.strip_suffix('m') {
        return format!("{}ns", stem);
    }
    // -al/-el/-ol/-ul lose the l and take -is; -il takes -s on the stem
    for suffix in ["al", "el", "ol", "ul"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            let vowel = &suffix[..1];
            return format!("{}{}is", stem, vowel);
        }
    }
    if let Some(stem) = word.strip_suffix("il") {
        return format!("{}is", stem);
    }
    if word.ends_with('r') || word.ends_with('z') {
        return format!("{}es", word);
    }
    // Words already ending in -s or -x are invariant
    if word.ends_with('s') || word.ends_with('x') {
        return word.to_string();
    }
    format!("{}s", word)
}

/// Pluralize the last word of a sentence, keeping punctuation attached to it.
pub fn pluralize_last_word(text: &str) -> String {
    let trimmed = text.trim_end();
    let trailing = &text[trimmed.len()..];

    // Whitespace can be multi-byte (NBSP in HTML-derived text), so advance
    // past it by the char's own width.
    let last_start = trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8());
    let Some(last_start) = last_start else {
        let (word, punct) = split_trailing_punct(trimmed);
        return format!("{}{}{}", pluralize_word(word), punct, trailing);
    };
    let (head, last) = trimmed.split_at(last_start);
    let (word, punct) = split_trailing_punct(last);
    format!("{}{}{}{}", head, pluralize_word(word), punct, trailing)
}

fn split_trailing_punct(word: &str) -> (&str, &str) {
    let end = word
        .char_indices()
        .rev()
        .take_while(|(_, c)| matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')'))
        .last()
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    word.split_at(end)
}

fn match_capitalization(original: &str, plural: &str) -> String {
    let first_upper = original.chars().next().is_some_and(|c| c.is_uppercase());
    if !first_upper {
        return plural.to_string();
    }
    let mut chars = plural.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plural() {
        assert_eq!(pluralize_word("gato"), "gatos");
        assert_eq!(pluralize_word("cisto"), "cistos");
    }

    #[test]
    fn test_l_endings() {
        assert_eq!(pluralize_word("canal"), "canais");
        assert_eq!(pluralize_word("funil"), "funis");
        assert_eq!(pluralize_word("azul"), "azuis");
    }

    #[test]
    fn test_exception_table() {
        assert_eq!(pluralize_word("mês"), "meses");
        assert_eq!(pluralize_word("órgão"), "órgãos");
    }

    #[test]
    fn test_nasal_and_consonant_endings() {
        assert_eq!(pluralize_word("homem"), "homens");
        assert_eq!(pluralize_word("tumor"), "tumores");
        assert_eq!(pluralize_word("raiz"), "raizes");
        assert_eq!(pluralize_word("nódulo"), "nódulos");
    }

    #[test]
    fn test_ao_default() {
        assert_eq!(pluralize_word("lesão"), "lesões");
    }

    #[test]
    fn test_capitalization_preserved() {
        assert_eq!(pluralize_word("Gato"), "Gatos");
        assert_eq!(pluralize_word("Mês"), "Meses");
    }

    #[test]
    fn test_last_word_with_punctuation() {
        assert_eq!(
            pluralize_last_word("Presença de cisto."),
            "Presença de cistos."
        );
        assert_eq!(pluralize_last_word("nódulo"), "nódulos");
    }

    #[test]
    fn test_last_word_after_nbsp() {
        assert_eq!(
            pluralize_last_word("Presença de\u{a0}cisto."),
            "Presença de\u{a0}cistos."
        );
    }
}
