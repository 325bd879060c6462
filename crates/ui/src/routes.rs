use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{DrillView, TopicsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", TopicsView)] Topics {},
        #[route("/drill/:topic", DrillView)] Drill { topic: String },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "masthead",
                h1 {
                    Link { to: Route::Topics {}, "Speech Drill" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
