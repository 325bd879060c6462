use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use log::warn;

use drill_core::model::{ROUND_TARGET, TopicId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::DrillVm;
use super::progress::ProgressPanel;
use super::scripts;
use super::scripts::CaptureEnvelope;
use super::visualizer::TranscriptView;

/// Delay before a correct round advances to the next sentence.
const AUTO_ADVANCE_MS: u64 = 1_200;

#[component]
pub fn DrillView(topic: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let catalog = ctx.catalog();
    let practice_loop = ctx.practice_loop();
    let vm = use_signal(move || {
        let id: TopicId = topic.parse().ok()?;
        let topic = catalog.get(&id).ok()?.clone();
        Some(DrillVm::new(topic, practice_loop))
    });
    let supported = use_signal(|| true);
    let mut last_spoken = use_signal(String::new);

    // Fetch a sentence for a fresh round. Stale results never come back:
    // the practice loop discards anything from a superseded round.
    let fetch_round = use_callback(move |()| {
        let mut vm = vm;
        let Some((token, topic_id, practice)) = ({
            let mut guard = vm.write();
            guard.as_mut().map(|vm| {
                let token = vm.start_round();
                (token, vm.topic().id().clone(), vm.practice_loop())
            })
        }) else {
            return;
        };
        spawn(async move {
            match practice.next_sentence(token, &topic_id).await {
                Ok(Some(sentence)) => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.sentence_loaded(sentence);
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    warn!("sentence fetch failed: {err}");
                    if let Some(vm) = vm.write().as_mut() {
                        vm.sentence_failed("Failed to load a sentence. Please try again.");
                    }
                }
            }
        });
    });

    let submit_transcript = use_callback(move |transcript: String| {
        let mut vm = vm;
        let Some((token, expected, practice)) = vm
            .read()
            .as_ref()
            .map(|vm| (vm.round(), vm.state().sentence.clone(), vm.practice_loop()))
        else {
            return;
        };
        spawn(async move {
            match practice.judge(token, &expected, &transcript).await {
                Ok(Some(verdict)) => {
                    let correct = verdict.correct;
                    let complete = {
                        let mut guard = vm.write();
                        let Some(vm) = guard.as_mut() else {
                            return;
                        };
                        vm.verdict_ready(verdict);
                        vm.is_complete()
                    };
                    if correct && !complete {
                        tokio::time::sleep(Duration::from_millis(AUTO_ADVANCE_MS)).await;
                        let still_current =
                            vm.read().as_ref().is_some_and(|vm| vm.round() == token);
                        if still_current {
                            fetch_round.call(());
                        }
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    warn!("judgment failed: {err}");
                    if let Some(vm) = vm.write().as_mut() {
                        vm.judgment_failed("Failed to validate your response. Please try again.");
                    }
                }
            }
        });
    });

    let toggle_record = use_callback(move |()| {
        let mut vm = vm;
        let mut supported = supported;
        let listening = vm
            .read()
            .as_ref()
            .is_some_and(|vm| vm.capture().is_listening());
        if listening {
            let _ = eval(scripts::STOP_RECOGNITION);
            return;
        }
        if let Some(vm) = vm.write().as_mut() {
            vm.capture_starting();
        }
        let mut channel = eval(scripts::START_RECOGNITION);
        spawn(async move {
            loop {
                let envelope = match channel.recv::<CaptureEnvelope>().await {
                    Ok(envelope) => envelope,
                    // The channel closes when the script (or the webview
                    // bridge) is gone.
                    Err(_) => break,
                };
                if envelope.kind == "unsupported" {
                    supported.set(false);
                }
                let Some(signal) = envelope.into_signal() else {
                    continue;
                };
                let submitted = vm.write().as_mut().and_then(|vm| vm.on_capture(signal));
                if let Some(transcript) = submitted {
                    submit_transcript.call(transcript);
                }
            }
        });
    });

    let restart = use_callback(move |()| {
        let mut vm = vm;
        let Some((topic, practice)) = vm
            .read()
            .as_ref()
            .map(|vm| (vm.topic().clone(), vm.practice_loop()))
        else {
            return;
        };
        vm.set(Some(DrillVm::new(topic, practice)));
        fetch_round.call(());
    });

    let mut started = use_signal(|| false);
    use_effect(move || {
        if !started() {
            started.set(true);
            fetch_round.call(());
        }
    });

    // Speak each freshly loaded sentence once; the Hear-it button replays.
    use_effect(move || {
        let sentence = vm
            .read()
            .as_ref()
            .map(|vm| vm.state().sentence.clone())
            .unwrap_or_default();
        if sentence.is_empty() || sentence == last_spoken() {
            return;
        }
        last_spoken.set(sentence.clone());
        let _ = eval(&scripts::speak_script(&sentence));
    });

    // Release the recognition capability on teardown, even mid-capture.
    use_drop(move || {
        let _ = eval(scripts::STOP_RECOGNITION);
    });

    let vm_guard = vm.read();
    let Some(vm_ref) = vm_guard.as_ref() else {
        return rsx! {
            div { class: "page drill-page",
                div { class: "drill-error",
                    p { "That topic does not exist." }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Topics {});
                    },
                    "← Back to topics"
                }
            }
        };
    };
    let state = vm_ref.state().clone();
    let topic_title = vm_ref.topic().title().to_string();
    let complete = vm_ref.is_complete();
    let elapsed = vm_ref.elapsed_minutes();
    drop(vm_guard);

    let feedback_view = state.feedback.as_ref().map(|verdict| {
        let class = if verdict.correct {
            "drill-feedback drill-feedback--correct"
        } else {
            "drill-feedback drill-feedback--incorrect"
        };
        (class, verdict.feedback.clone())
    });
    let record_disabled = !supported() || state.loading || complete;

    rsx! {
        div { class: "page drill-page",
            div { class: "drill-header",
                button {
                    class: "btn btn-secondary",
                    id: "drill-back",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Topics {});
                    },
                    "← Back"
                }
                h2 { "{topic_title}" }
            }

            ProgressPanel { score: state.score, streak: state.streak, progress: state.progress }

            if complete {
                div { class: "drill-complete",
                    h3 { class: "drill-complete__title", "Session complete" }
                    p { class: "drill-complete__subtitle",
                        "You nailed {ROUND_TARGET} sentences in {elapsed} min. Final score: {state.score}."
                    }
                    div { class: "drill-complete__actions",
                        button {
                            class: "btn btn-primary",
                            id: "drill-restart",
                            r#type: "button",
                            onclick: move |_| restart.call(()),
                            "Practice Again"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Topics {});
                            },
                            "Pick Another Topic"
                        }
                    }
                }
            } else {
                div { class: "drill-card",
                    div { class: "drill-sentence",
                        h3 { "Sentence to practice:" }
                        p { class: "drill-sentence__text",
                            if state.loading {
                                "Loading..."
                            } else {
                                "{state.sentence}"
                            }
                        }
                        button {
                            class: "btn btn-ghost",
                            id: "drill-speak",
                            r#type: "button",
                            disabled: state.sentence.is_empty(),
                            onclick: move |_| {
                                let sentence = vm
                                    .read()
                                    .as_ref()
                                    .map(|vm| vm.state().sentence.clone())
                                    .unwrap_or_default();
                                if !sentence.is_empty() {
                                    let _ = eval(&scripts::speak_script(&sentence));
                                }
                            },
                            "🔊 Hear it"
                        }
                    }

                    TranscriptView {
                        expected: state.sentence.clone(),
                        spoken: state.response.clone(),
                        listening: state.listening,
                    }

                    div { class: "drill-controls",
                        RecordButton {
                            listening: state.listening,
                            disabled: record_disabled,
                            on_toggle: move |()| toggle_record.call(()),
                        }
                    }

                    if let Some((class, message)) = feedback_view {
                        div { class: "{class}",
                            p { "{message}" }
                        }
                    }

                    if let Some(error) = state.error.clone() {
                        div { class: "drill-error",
                            p { "{error}" }
                        }
                    }

                    div { class: "drill-actions",
                        button {
                            class: "btn btn-primary",
                            id: "drill-retry",
                            r#type: "button",
                            disabled: record_disabled,
                            onclick: move |_| toggle_record.call(()),
                            "Try Again"
                        }
                        button {
                            class: "btn btn-primary",
                            id: "drill-next",
                            r#type: "button",
                            disabled: state.loading,
                            onclick: move |_| fetch_round.call(()),
                            "Next Sentence"
                        }
                    }

                    if state.loading {
                        div { class: "drill-spinner" }
                    }
                }
            }
        }
    }
}

#[component]
fn RecordButton(listening: bool, disabled: bool, on_toggle: EventHandler<()>) -> Element {
    let (class, label) = if listening {
        ("record-btn record-btn--live", "Stop")
    } else {
        ("record-btn", "Record")
    };
    rsx! {
        button {
            class: "{class}",
            id: "drill-record",
            r#type: "button",
            disabled: disabled,
            onclick: move |_| on_toggle.call(()),
            "{label}"
        }
    }
}
