use dioxus::prelude::*;

use drill_core::model::word_marks;

/// Word-by-word rendering of the spoken transcript against the target
/// sentence. Matching is positional; see `drill_core::model::compare`.
#[component]
pub fn TranscriptView(expected: String, spoken: String, listening: bool) -> Element {
    if !listening && spoken.is_empty() {
        return rsx! {};
    }

    let heading = if listening { "Speaking..." } else { "Your speech:" };
    let marks = word_marks(&expected, &spoken);

    rsx! {
        div { class: "transcript-panel",
            h3 { class: "transcript-heading", "{heading}" }
            div { class: "transcript-words",
                for (index, mark) in marks.into_iter().enumerate() {
                    WordSpan {
                        key: "{index}",
                        text: mark.text,
                        correct: mark.correct,
                        listening: listening,
                    }
                }
                if listening {
                    span { class: "transcript-cursor" }
                }
            }
        }
    }
}

#[component]
fn WordSpan(text: String, correct: bool, listening: bool) -> Element {
    let mut class = String::from(if correct {
        "transcript-word transcript-word--match"
    } else {
        "transcript-word transcript-word--miss"
    });
    if listening {
        class.push_str(" transcript-word--live");
    }
    rsx! {
        span { class: "{class}", "{text}" }
    }
}
