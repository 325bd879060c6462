use serde::{Deserialize, Serialize};

/// Points awarded for each correct judgment.
pub const SCORE_PER_CORRECT: u32 = 10;

/// Number of correct sentences that complete one practice session.
pub const ROUND_TARGET: u32 = 10;

/// Correctness judgment plus explanatory feedback for one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    pub feedback: String,
}

/// Mutable state for one practice screen.
///
/// Created when a topic is selected and discarded when the learner
/// navigates back; there is exactly one instance per active drill and it is
/// owned by the drill view-model, never shared ambiently.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PracticeState {
    /// Target utterance, replaced each round.
    pub sentence: String,
    /// Latest transcript, live-updated while listening.
    pub response: String,
    pub listening: bool,
    /// Result of the last judgment, cleared on the next attempt.
    pub feedback: Option<Verdict>,
    /// Last surfaced failure, cleared when a new action begins.
    pub error: Option<String>,
    pub loading: bool,
    pub score: u32,
    pub streak: u32,
    /// Fraction of the session target completed, in `[0, 1]`.
    pub progress: f32,
}

/// Events accepted by the practice reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum PracticeEvent {
    SetSentence(String),
    SetResponse(String),
    SetListening(bool),
    SetFeedback(Option<Verdict>),
    SetError(Option<String>),
    SetLoading(bool),
    IncrementScore,
    IncrementStreak,
    ResetStreak,
    /// Absolute overwrite, not accumulation.
    UpdateProgress(f32),
}

/// Applies one event to the state.
///
/// Pure and total: every transition depends only on the prior state and the
/// event payload.
#[must_use]
pub fn reduce(state: PracticeState, event: PracticeEvent) -> PracticeState {
    let mut state = state;
    match event {
        PracticeEvent::SetSentence(sentence) => state.sentence = sentence,
        PracticeEvent::SetResponse(response) => state.response = response,
        PracticeEvent::SetListening(listening) => state.listening = listening,
        PracticeEvent::SetFeedback(feedback) => state.feedback = feedback,
        PracticeEvent::SetError(error) => state.error = error,
        PracticeEvent::SetLoading(loading) => state.loading = loading,
        PracticeEvent::IncrementScore => {
            state.score = state.score.saturating_add(SCORE_PER_CORRECT);
        }
        PracticeEvent::IncrementStreak => state.streak = state.streak.saturating_add(1),
        PracticeEvent::ResetStreak => state.streak = 0,
        PracticeEvent::UpdateProgress(value) => state.progress = value.clamp(0.0, 1.0),
    }
    state
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: PracticeState, events: &[PracticeEvent]) -> PracticeState {
        events
            .iter()
            .fold(state, |state, event| reduce(state, event.clone()))
    }

    #[test]
    fn score_increases_by_ten_per_correct() {
        let state = apply(
            PracticeState::default(),
            &[PracticeEvent::IncrementScore, PracticeEvent::IncrementScore],
        );
        assert_eq!(state.score, 20);
    }

    #[test]
    fn streak_increments_and_resets_regardless_of_prior_value() {
        let mut state = PracticeState::default();
        for _ in 0..7 {
            state = reduce(state, PracticeEvent::IncrementStreak);
        }
        assert_eq!(state.streak, 7);
        let state = reduce(state, PracticeEvent::ResetStreak);
        assert_eq!(state.streak, 0);
        let state = reduce(state, PracticeEvent::IncrementStreak);
        assert_eq!(state.streak, 1);
    }

    #[test]
    fn reset_streak_leaves_score_untouched() {
        let state = apply(
            PracticeState::default(),
            &[
                PracticeEvent::IncrementScore,
                PracticeEvent::IncrementStreak,
                PracticeEvent::ResetStreak,
            ],
        );
        assert_eq!(state.score, SCORE_PER_CORRECT);
        assert_eq!(state.streak, 0);
    }

    #[test]
    fn progress_is_overwritten_not_accumulated() {
        let state = apply(
            PracticeState::default(),
            &[
                PracticeEvent::UpdateProgress(0.3),
                PracticeEvent::UpdateProgress(0.1),
            ],
        );
        assert!((state.progress - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn progress_is_clamped_to_unit_interval() {
        let state = reduce(PracticeState::default(), PracticeEvent::UpdateProgress(1.4));
        assert!((state.progress - 1.0).abs() < f32::EPSILON);
        let state = reduce(state, PracticeEvent::UpdateProgress(-0.2));
        assert!(state.progress.abs() < f32::EPSILON);
    }

    #[test]
    fn payload_events_replace_fields() {
        let verdict = Verdict {
            correct: true,
            feedback: "Every word matched.".to_string(),
        };
        let state = apply(
            PracticeState::default(),
            &[
                PracticeEvent::SetSentence("I visited Paris last summer".to_string()),
                PracticeEvent::SetResponse("i visited paris".to_string()),
                PracticeEvent::SetListening(true),
                PracticeEvent::SetFeedback(Some(verdict.clone())),
                PracticeEvent::SetError(Some("boom".to_string())),
                PracticeEvent::SetLoading(true),
            ],
        );
        assert_eq!(state.sentence, "I visited Paris last summer");
        assert_eq!(state.response, "i visited paris");
        assert!(state.listening);
        assert_eq!(state.feedback, Some(verdict));
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(state.loading);

        let state = apply(
            state,
            &[
                PracticeEvent::SetFeedback(None),
                PracticeEvent::SetError(None),
                PracticeEvent::SetLoading(false),
            ],
        );
        assert_eq!(state.feedback, None);
        assert_eq!(state.error, None);
        assert!(!state.loading);
    }
}
