//! Text normalization and matching helpers
//!
//! Everything downstream of the classifier works on normalized text:
//! lowercase, repeated punctuation collapsed, whitespace collapsed.

/// Normalize raw user input for rule matching.
///
/// Lowercases, collapses runs of repeated `!`, `?`, `.`, `,` to a single
/// occurrence, collapses whitespace runs to single spaces, and trims.
/// Empty or whitespace-only input normalizes to the empty string.
pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut collapsed = String::with_capacity(lowered.len());
    let mut prev: Option<char> = None;
    for ch in lowered.chars() {
        if matches!(ch, '!' | '?' | '.' | ',') && prev == Some(ch) {
            continue;
        }
        collapsed.push(ch);
        prev = Some(ch);
    }
    collapsed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-delimited non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True if any configured phrase occurs anywhere in the text.
///
/// Matching is substring-based, not token-based: "schedule" matches
/// inside "scheduled". The lexicon lists are tuned with that in mind.
pub fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| text.contains(p.as_str()))
}

/// Number of distinct configured phrases present in the text.
pub fn count_matches(text: &str, phrases: &[String]) -> usize {
    phrases.iter().filter(|p| text.contains(p.as_str())).count()
}

/// Split text into sentences, breaking after `.`, `!`, or `?` followed
/// by whitespace. Fragments without a trailing terminator form the last
/// sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') && chars.peek().is_some_and(|c| c.is_whitespace()) {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_case_punctuation_and_whitespace() {
        assert_eq!(normalize("  I CAN'T!!!   think...  "), "i can't! think.");
        assert_eq!(normalize("so,, many,,, commas"), "so, many, commas");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n  "), "");
    }

    #[test]
    fn alternating_punctuation_is_preserved() {
        // Only runs of the same character collapse
        assert_eq!(normalize("what?!?!"), "what?!?!");
        assert_eq!(normalize("what??!!"), "what?!");
    }

    #[test]
    fn counts_whitespace_delimited_words() {
        assert_eq!(word_count("one two  three"), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn splits_on_terminator_then_whitespace() {
        assert_eq!(
            split_sentences("Stop. That voice is not useful here. We move."),
            vec!["Stop.", "That voice is not useful here.", "We move."]
        );
        assert_eq!(
            split_sentences("No terminator at the end"),
            vec!["No terminator at the end"]
        );
        assert_eq!(split_sentences(""), Vec::<String>::new());
    }
}
