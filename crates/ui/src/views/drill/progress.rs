use dioxus::prelude::*;

/// Score, streak, and session-progress panel for the drill screen.
#[component]
pub fn ProgressPanel(score: u32, streak: u32, progress: f32) -> Element {
    let percent = (progress.clamp(0.0, 1.0) * 100.0).round() as u32;

    rsx! {
        div { class: "progress-panel",
            div { class: "progress-stats",
                div { class: "progress-stat",
                    p { class: "progress-stat__label", "Score" }
                    p { class: "progress-stat__value", "{score}" }
                }
                div { class: "progress-stat progress-stat--streak",
                    p { class: "progress-stat__label", "Streak" }
                    p { class: "progress-stat__value", "{streak} 🔥" }
                }
            }
            div { class: "progress-track",
                div { class: "progress-meter",
                    span { "Session progress" }
                    span { "{percent}%" }
                }
                div { class: "progress-bar",
                    div { class: "progress-bar__fill", style: "width: {percent}%" }
                }
            }
        }
    }
}
