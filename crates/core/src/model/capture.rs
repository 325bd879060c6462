//! Speech-capture lifecycle as an explicit state machine.
//!
//! The recognition capability delivers a stream of discrete events; this
//! module reduces that stream to state transitions plus at most one effect
//! per event. The `Finalizing` state swallows anything that arrives after a
//! final result, which is what guarantees a single judgment per utterance.

/// Discrete events emitted by the speech-recognition capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSignal {
    Started,
    /// A partial transcript for the in-progress utterance.
    Interim(String),
    /// The finalized transcript for the utterance.
    Final(String),
    /// Capture ended, whether after a final result or a silence timeout.
    Ended,
    Failed(String),
}

/// Lifecycle of one microphone capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Listening,
    /// A final result arrived; waiting for the capability to wind down.
    Finalizing,
}

impl CaptureState {
    /// Whether the capability currently holds the microphone.
    #[must_use]
    pub fn is_listening(self) -> bool {
        matches!(self, CaptureState::Listening | CaptureState::Finalizing)
    }
}

/// Side effect requested by a capture transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEffect {
    /// Replace the displayed transcript; never triggers a judgment.
    Transcript(String),
    /// Replace the transcript and judge it. Emitted at most once per utterance.
    Submit(String),
    /// Surface a capture failure. No automatic retry.
    Error(String),
}

/// Advances the capture machine by one signal.
///
/// Total over all `(state, signal)` pairs; combinations outside the expected
/// flow leave the state unchanged with no effect.
#[must_use]
pub fn step(state: CaptureState, signal: CaptureSignal) -> (CaptureState, Option<CaptureEffect>) {
    use CaptureState::{Finalizing, Idle, Listening};

    match (state, signal) {
        (Idle, CaptureSignal::Started) => (Listening, None),
        (Listening, CaptureSignal::Interim(text)) => {
            (Listening, Some(CaptureEffect::Transcript(text)))
        }
        (Listening, CaptureSignal::Final(text)) => (Finalizing, Some(CaptureEffect::Submit(text))),
        (Listening | Finalizing, CaptureSignal::Ended) => (Idle, None),
        (_, CaptureSignal::Failed(message)) => (Idle, Some(CaptureEffect::Error(message))),
        (state, _) => (state, None),
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
