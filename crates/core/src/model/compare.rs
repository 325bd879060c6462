//! Word-level comparison between the target sentence and a transcript.
//!
//! Matching is positional: the spoken word at index `i` is compared against
//! the expected word at index `i`, so an inserted or omitted word misaligns
//! everything after it. No alignment pass is attempted.

/// Punctuation stripped before comparing words.
const PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Strips the fixed punctuation set and lowercases a single token.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// One spoken word with its positional match result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMark {
    /// The word as spoken, unnormalized.
    pub text: String,
    pub correct: bool,
}

/// Marks each spoken word against the expected word at the same index.
#[must_use]
pub fn word_marks(expected: &str, spoken: &str) -> Vec<WordMark> {
    let targets: Vec<String> = expected.split_whitespace().map(normalize_word).collect();
    spoken
        .split_whitespace()
        .enumerate()
        .map(|(index, word)| WordMark {
            text: word.to_string(),
            correct: targets
                .get(index)
                .is_some_and(|target| *target == normalize_word(word)),
        })
        .collect()
}

/// Whether the transcript matches the expected sentence word for word,
/// ignoring case and the fixed punctuation set.
#[must_use]
pub fn transcript_matches(expected: &str, spoken: &str) -> bool {
    let targets: Vec<String> = expected.split_whitespace().map(normalize_word).collect();
    let words: Vec<String> = spoken.split_whitespace().map(normalize_word).collect();
    targets == words
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_ignores_case_and_punctuation() {
        assert!(transcript_matches("The cat runs.", "the cat runs"));
        let marks = word_marks("The cat runs.", "the cat runs");
        assert!(marks.iter().all(|mark| mark.correct));
    }

    #[test]
    fn insertion_misaligns_every_following_word() {
        let marks = word_marks("I like cats and dogs", "I really like cats and dogs");
        let correct: Vec<bool> = marks.iter().map(|mark| mark.correct).collect();
        assert_eq!(correct, vec![true, false, false, false, false, false]);
    }

    #[test]
    fn extra_trailing_words_are_marked_incorrect() {
        let marks = word_marks("She works", "she works hard");
        let correct: Vec<bool> = marks.iter().map(|mark| mark.correct).collect();
        assert_eq!(correct, vec![true, true, false]);
    }

    #[test]
    fn marks_keep_the_spoken_form() {
        let marks = word_marks("The cat runs", "The cat");
        assert_eq!(marks[0].text, "The");
        assert_eq!(marks.len(), 2);
    }

    #[test]
    fn missing_words_fail_the_sentence_match() {
        assert!(!transcript_matches("I like cats and dogs", "I like cats"));
        assert!(!transcript_matches("She works", "she works hard"));
    }

    #[test]
    fn normalization_strips_only_the_fixed_set() {
        assert_eq!(normalize_word("Runs."), "runs");
        assert_eq!(normalize_word("well-known"), "well-known");
        assert_eq!(normalize_word("What?!"), "what");
    }
}
