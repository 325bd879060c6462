use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

/// Topic picker: one card per catalog entry.
#[component]
pub fn TopicsView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    rsx! {
        div { class: "page topics-page",
            h2 { "Pick a topic" }
            p { class: "topics-hint",
                "Choose a grammar topic, listen to the sentence, and repeat it out loud."
            }
            ul { class: "topic-grid",
                for topic in catalog.topics().iter().cloned() {
                    li { key: "{topic.id()}",
                        Link {
                            class: "topic-card",
                            to: Route::Drill { topic: topic.id().to_string() },
                            h3 { class: "topic-card__title", "{topic.title()}" }
                            p { class: "topic-card__description", "{topic.description()}" }
                            span { class: "topic-card__count", "{topic.sentences().len()} sentences" }
                        }
                    }
                }
            }
        }
    }
}
