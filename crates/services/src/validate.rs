use async_trait::async_trait;
use log::warn;
use serde::Deserialize;

use drill_core::model::{Verdict, transcript_matches, word_marks};

use crate::error::ValidateError;
use crate::genai::GenAiClient;

/// Decides whether a spoken response matches the target sentence.
///
/// Exactly one validator is wired at startup; the two implementations are
/// explicit alternatives, never blended.
#[async_trait]
pub trait ResponseValidator: Send + Sync {
    /// Judges the transcript against the expected sentence.
    ///
    /// # Errors
    ///
    /// Returns `ValidateError` when a remote judgment fails or its payload
    /// cannot be parsed.
    async fn judge(&self, expected: &str, actual: &str) -> Result<Verdict, ValidateError>;
}

/// Canonical policy: case- and punctuation-insensitive positional word
/// comparison, the same rule the transcript visualizer renders.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordMatchValidator;

#[async_trait]
impl ResponseValidator for WordMatchValidator {
    async fn judge(&self, expected: &str, actual: &str) -> Result<Verdict, ValidateError> {
        let correct = transcript_matches(expected, actual);
        let feedback = if correct {
            "Every word matched.".to_string()
        } else {
            let matched = word_marks(expected, actual)
                .iter()
                .filter(|mark| mark.correct)
                .count();
            let target = expected.split_whitespace().count();
            format!("{matched} of {target} words matched. Listen again and retry.")
        };
        Ok(Verdict { correct, feedback })
    }
}

/// Alternate policy: semantic equivalence judged by the hosted model.
pub struct SemanticValidator {
    client: GenAiClient,
}

impl SemanticValidator {
    #[must_use]
    pub fn new(client: GenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResponseValidator for SemanticValidator {
    async fn judge(&self, expected: &str, actual: &str) -> Result<Verdict, ValidateError> {
        let prompt = judgment_prompt(expected, actual);
        let reply = self.client.generate(&prompt).await.map_err(|err| {
            warn!("semantic judgment failed: {err}");
            ValidateError::Remote(err)
        })?;
        parse_verdict(&reply)
    }
}

fn judgment_prompt(expected: &str, actual: &str) -> String {
    format!(
        "You are a JSON response generator. Your task is to compare two English \
         sentences and determine if they have the same meaning.\n\n\
         Sentence 1: \"{expected}\"\n\
         Sentence 2: \"{actual}\"\n\n\
         Provide your response in valid JSON format like this example:\n\
         {{\n  \"isCorrect\": true,\n  \"feedback\": \"Both sentences are identical\"\n}}\n\n\
         Your response MUST be a valid JSON object with exactly these two fields \
         and types:\n\
         - isCorrect: boolean (true/false)\n\
         - feedback: string\n\n\
         Respond with ONLY the JSON object, no other text."
    )
}

/// Wire shape of the model's judgment reply. Exactly two fields are
/// accepted; anything extra or missing fails the parse.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VerdictPayload {
    #[serde(rename = "isCorrect")]
    is_correct: bool,
    feedback: String,
}

/// Parses the model reply as the two-field verdict payload, tolerating a
/// fenced ```json block around the object.
fn parse_verdict(reply: &str) -> Result<Verdict, ValidateError> {
    let payload: VerdictPayload =
        serde_json::from_str(strip_fences(reply)).map_err(ValidateError::MalformedVerdict)?;
    Ok(Verdict {
        correct: payload.is_correct,
        feedback: payload.feedback,
    })
}

fn strip_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn word_match_ignores_case_and_punctuation() {
        let verdict = WordMatchValidator
            .judge("The cat runs.", "the cat runs")
            .await
            .unwrap();
        assert!(verdict.correct);
        assert_eq!(verdict.feedback, "Every word matched.");
    }

    #[tokio::test]
    async fn word_match_counts_positional_matches() {
        let verdict = WordMatchValidator
            .judge("I like cats and dogs", "I really like cats and dogs")
            .await
            .unwrap();
        assert!(!verdict.correct);
        assert!(verdict.feedback.starts_with("1 of 5 words matched"));
    }

    #[test]
    fn verdict_parses_the_two_field_payload() {
        let verdict =
            parse_verdict(r#"{"isCorrect": true, "feedback": "Both sentences are identical"}"#)
                .unwrap();
        assert!(verdict.correct);
        assert_eq!(verdict.feedback, "Both sentences are identical");
    }

    #[test]
    fn verdict_parses_inside_code_fences() {
        let reply = "```json\n{\"isCorrect\": false, \"feedback\": \"Different meaning\"}\n```";
        let verdict = parse_verdict(reply).unwrap();
        assert!(!verdict.correct);
    }

    #[test]
    fn missing_feedback_field_is_malformed() {
        let err = parse_verdict(r#"{"isCorrect": true}"#).unwrap_err();
        assert!(matches!(err, ValidateError::MalformedVerdict(_)));
    }

    #[test]
    fn unknown_fields_are_malformed() {
        let err = parse_verdict(
            r#"{"isCorrect": true, "feedback": "ok", "confidence": 0.9}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ValidateError::MalformedVerdict(_)));
    }

    #[test]
    fn non_boolean_verdict_is_malformed() {
        let err = parse_verdict(r#"{"isCorrect": "yes", "feedback": "ok"}"#).unwrap_err();
        assert!(matches!(err, ValidateError::MalformedVerdict(_)));
    }

    #[test]
    fn prose_replies_are_malformed() {
        let err = parse_verdict("The sentences mean the same thing.").unwrap_err();
        assert!(matches!(err, ValidateError::MalformedVerdict(_)));
    }
}
