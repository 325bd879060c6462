use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

use drill_core::Clock;
use drill_core::model::{TopicId, Verdict};

use crate::error::{SentenceError, ValidateError};
use crate::sentences::SentenceSource;
use crate::validate::ResponseValidator;

/// Identifies one practice round.
///
/// Any async result carrying a token from a superseded round is discarded
/// instead of touching session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundToken(u64);

/// Orchestrates sentence fetches and judgments for one drill screen.
///
/// The sentence source and validator are fixed at construction; the epoch
/// is the only mutable piece and only ever moves forward.
pub struct PracticeLoopService {
    clock: Clock,
    sentences: Arc<dyn SentenceSource>,
    validator: Arc<dyn ResponseValidator>,
    epoch: AtomicU64,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        sentences: Arc<dyn SentenceSource>,
        validator: Arc<dyn ResponseValidator>,
    ) -> Self {
        Self {
            clock,
            sentences,
            validator,
            epoch: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Starts a new round, invalidating every in-flight call from prior
    /// rounds.
    pub fn begin_round(&self) -> RoundToken {
        RoundToken(self.epoch.fetch_add(1, Ordering::AcqRel) + 1)
    }

    fn is_current(&self, token: RoundToken) -> bool {
        self.epoch.load(Ordering::Acquire) == token.0
    }

    /// Fetches one sentence for the topic.
    ///
    /// Returns `Ok(None)` when the round advanced while the fetch was in
    /// flight; a stale sentence (or a stale failure) must not reach state.
    ///
    /// # Errors
    ///
    /// Propagates `SentenceError` from the source for the current round.
    pub async fn next_sentence(
        &self,
        token: RoundToken,
        topic: &TopicId,
    ) -> Result<Option<String>, SentenceError> {
        let result = self.sentences.next(topic).await;
        if !self.is_current(token) {
            debug!("discarding stale sentence result for round {}", token.0);
            return Ok(None);
        }
        result.map(Some)
    }

    /// Judges the transcript against the target sentence, with the same
    /// stale-discard contract as [`Self::next_sentence`].
    ///
    /// # Errors
    ///
    /// Propagates `ValidateError` from the validator for the current round.
    pub async fn judge(
        &self,
        token: RoundToken,
        expected: &str,
        actual: &str,
    ) -> Result<Option<Verdict>, ValidateError> {
        let result = self.validator.judge(expected, actual).await;
        if !self.is_current(token) {
            debug!("discarding stale verdict for round {}", token.0);
            return Ok(None);
        }
        result.map(Some)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
