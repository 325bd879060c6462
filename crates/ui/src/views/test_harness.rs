use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use drill_core::model::{TopicCatalog, TopicId};
use drill_core::time::fixed_now;
use services::error::SentenceError;
use services::{Clock, PracticeLoopService, SentenceSource, WordMatchValidator};

use crate::context::{UiApp, build_app_context};
use crate::views::{DrillView, TopicsView};

/// Sentence source that always yields the first bank sentence, keeping
/// rendered output deterministic.
struct FirstSentenceSource {
    catalog: Arc<TopicCatalog>,
}

#[async_trait]
impl SentenceSource for FirstSentenceSource {
    async fn next(&self, topic: &TopicId) -> Result<String, SentenceError> {
        let topic = self.catalog.get(topic)?;
        Ok(topic.sentences()[0].clone())
    }
}

struct TestApp {
    catalog: Arc<TopicCatalog>,
    practice_loop: Arc<PracticeLoopService>,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<TopicCatalog> {
        Arc::clone(&self.catalog)
    }

    fn practice_loop(&self) -> Arc<PracticeLoopService> {
        Arc::clone(&self.practice_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Topics,
    Drill(&'static str),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Topics => rsx! { TopicsView {} },
        ViewKind::Drill(topic) => rsx! { DrillView { topic: topic.to_string() } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let catalog = Arc::new(TopicCatalog::builtin());
    let practice_loop = Arc::new(PracticeLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(FirstSentenceSource {
            catalog: Arc::clone(&catalog),
        }),
        Arc::new(WordMatchValidator),
    ));
    let app = Arc::new(TestApp {
        catalog,
        practice_loop,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
