use std::sync::Arc;

use chrono::{DateTime, Utc};

use drill_core::model::{
    CaptureEffect, CaptureSignal, CaptureState, PracticeEvent, PracticeState, ROUND_TARGET, Topic,
    Verdict, capture_step, reduce,
};
use services::{PracticeLoopService, RoundToken};

/// View-model for one drill screen.
///
/// Owns the practice state, the capture machine, and the current round
/// token. Every state mutation funnels through the reducer; the async
/// plumbing around it lives in the view.
pub struct DrillVm {
    topic: Topic,
    practice_loop: Arc<PracticeLoopService>,
    state: PracticeState,
    capture: CaptureState,
    round: RoundToken,
    correct_rounds: u32,
    started_at: DateTime<Utc>,
}

impl DrillVm {
    #[must_use]
    pub fn new(topic: Topic, practice_loop: Arc<PracticeLoopService>) -> Self {
        let round = practice_loop.begin_round();
        let started_at = practice_loop.clock().now();
        Self {
            topic,
            practice_loop,
            state: PracticeState::default(),
            capture: CaptureState::default(),
            round,
            correct_rounds: 0,
            started_at,
        }
    }

    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    #[must_use]
    pub fn state(&self) -> &PracticeState {
        &self.state
    }

    #[must_use]
    pub fn capture(&self) -> CaptureState {
        self.capture
    }

    #[must_use]
    pub fn round(&self) -> RoundToken {
        self.round
    }

    #[must_use]
    pub fn practice_loop(&self) -> Arc<PracticeLoopService> {
        Arc::clone(&self.practice_loop)
    }

    /// Whether the session target has been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.correct_rounds >= ROUND_TARGET
    }

    /// Minutes since the drill screen was opened.
    #[must_use]
    pub fn elapsed_minutes(&self) -> i64 {
        (self.practice_loop.clock().now() - self.started_at).num_minutes()
    }

    fn apply(&mut self, event: PracticeEvent) {
        self.state = reduce(self.state.clone(), event);
    }

    /// Starts a new round: bumps the epoch, clears the previous attempt, and
    /// flags the sentence fetch.
    pub fn start_round(&mut self) -> RoundToken {
        self.round = self.practice_loop.begin_round();
        self.apply(PracticeEvent::SetResponse(String::new()));
        self.apply(PracticeEvent::SetFeedback(None));
        self.apply(PracticeEvent::SetError(None));
        self.apply(PracticeEvent::SetLoading(true));
        self.round
    }

    pub fn sentence_loaded(&mut self, sentence: String) {
        self.apply(PracticeEvent::SetSentence(sentence));
        self.apply(PracticeEvent::SetLoading(false));
    }

    pub fn sentence_failed(&mut self, message: &str) {
        self.apply(PracticeEvent::SetError(Some(message.to_string())));
        self.apply(PracticeEvent::SetLoading(false));
    }

    /// Clears the previous attempt right before the capability starts.
    pub fn capture_starting(&mut self) {
        self.apply(PracticeEvent::SetResponse(String::new()));
        self.apply(PracticeEvent::SetFeedback(None));
        self.apply(PracticeEvent::SetError(None));
    }

    /// Applies one capability signal. Returns the finalized transcript when
    /// the utterance should be judged.
    pub fn on_capture(&mut self, signal: CaptureSignal) -> Option<String> {
        let (next, effect) = capture_step(self.capture, signal);
        self.capture = next;
        self.apply(PracticeEvent::SetListening(next.is_listening()));

        match effect {
            Some(CaptureEffect::Transcript(text)) => {
                self.apply(PracticeEvent::SetResponse(text));
                None
            }
            Some(CaptureEffect::Submit(text)) => {
                self.apply(PracticeEvent::SetResponse(text.clone()));
                self.apply(PracticeEvent::SetLoading(true));
                Some(text)
            }
            Some(CaptureEffect::Error(message)) => {
                self.apply(PracticeEvent::SetError(Some(message)));
                None
            }
            None => None,
        }
    }

    /// Applies a judgment for the current round.
    pub fn verdict_ready(&mut self, verdict: Verdict) {
        self.apply(PracticeEvent::SetLoading(false));
        if verdict.correct {
            self.apply(PracticeEvent::IncrementScore);
            self.apply(PracticeEvent::IncrementStreak);
            self.correct_rounds = self.correct_rounds.saturating_add(1);
            self.apply(PracticeEvent::UpdateProgress(
                self.correct_rounds as f32 / ROUND_TARGET as f32,
            ));
        } else {
            self.apply(PracticeEvent::ResetStreak);
        }
        self.apply(PracticeEvent::SetFeedback(Some(verdict)));
    }

    pub fn judgment_failed(&mut self, message: &str) {
        self.apply(PracticeEvent::SetError(Some(message.to_string())));
        self.apply(PracticeEvent::SetLoading(false));
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
