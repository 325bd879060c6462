use std::sync::Arc;

use drill_core::model::TopicCatalog;
use services::PracticeLoopService;

/// Surface the composition root exposes to the views.
pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<TopicCatalog>;
    fn practice_loop(&self) -> Arc<PracticeLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<TopicCatalog>,
    practice_loop: Arc<PracticeLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            practice_loop: app.practice_loop(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<TopicCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn practice_loop(&self) -> Arc<PracticeLoopService> {
        Arc::clone(&self.practice_loop)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
