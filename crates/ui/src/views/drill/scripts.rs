//! JS bridges to the webview's speech capabilities.
//!
//! The recognition bridge owns a single `window.__drillRecognition`
//! instance between start and stop/end; every capability event crosses the
//! eval channel as a small JSON envelope.

use serde::Deserialize;

use drill_core::model::CaptureSignal;

/// Fatal-for-the-session message when recognition is unavailable.
pub(super) const UNSUPPORTED_MESSAGE: &str =
    "Speech recognition is not supported in this environment.";

/// Wire envelope for capability events crossing the eval channel.
#[derive(Debug, Deserialize)]
pub(super) struct CaptureEnvelope {
    pub kind: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub message: String,
}

impl CaptureEnvelope {
    /// Maps the envelope onto a capture signal. Unknown kinds are dropped.
    pub(super) fn into_signal(self) -> Option<CaptureSignal> {
        match self.kind.as_str() {
            "start" => Some(CaptureSignal::Started),
            "interim" => Some(CaptureSignal::Interim(self.transcript)),
            "final" => Some(CaptureSignal::Final(self.transcript)),
            "end" => Some(CaptureSignal::Ended),
            "error" => Some(CaptureSignal::Failed(recognition_error_message(
                &self.message,
            ))),
            "unsupported" => Some(CaptureSignal::Failed(UNSUPPORTED_MESSAGE.to_string())),
            _ => None,
        }
    }
}

fn recognition_error_message(code: &str) -> String {
    match code {
        "not-allowed" | "service-not-allowed" => {
            "Microphone access was denied. Allow it and try again.".to_string()
        }
        _ => "Speech recognition error. Please try again.".to_string(),
    }
}

pub(super) const START_RECOGNITION: &str = r#"(function() {
    const Recognition = window.SpeechRecognition || window.webkitSpeechRecognition;
    if (!Recognition) {
        dioxus.send({ kind: "unsupported" });
        return;
    }
    if (window.__drillRecognition) {
        try { window.__drillRecognition.stop(); } catch (_) {}
        window.__drillRecognition = null;
    }
    const recognition = new Recognition();
    recognition.continuous = false;
    recognition.interimResults = true;
    recognition.lang = "en-US";
    recognition.onstart = () => dioxus.send({ kind: "start" });
    recognition.onresult = (event) => {
        const result = event.results[event.results.length - 1];
        dioxus.send({
            kind: result.isFinal ? "final" : "interim",
            transcript: result[0].transcript,
        });
    };
    recognition.onend = () => {
        window.__drillRecognition = null;
        dioxus.send({ kind: "end" });
    };
    recognition.onerror = (event) => {
        dioxus.send({ kind: "error", message: event.error || "recognition error" });
    };
    window.__drillRecognition = recognition;
    try {
        recognition.start();
    } catch (_) {
        window.__drillRecognition = null;
        dioxus.send({ kind: "error", message: "failed to start" });
    }
})();"#;

pub(super) const STOP_RECOGNITION: &str = r#"(function() {
    const recognition = window.__drillRecognition;
    if (recognition) {
        try { recognition.stop(); } catch (_) {}
    }
})();"#;

pub(super) fn speak_script(sentence: &str) -> String {
    format!(
        r#"(function() {{
    if (!window.speechSynthesis) return;
    window.speechSynthesis.cancel();
    const utterance = new SpeechSynthesisUtterance({sentence:?});
    utterance.lang = "en-US";
    window.speechSynthesis.speak(utterance);
}})();"#
    )
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
