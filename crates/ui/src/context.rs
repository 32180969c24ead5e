use std::sync::Arc;

use dioxus::prelude::*;
use drill_core::model::{DrillConfig, SessionResult};
use services::DrillService;

pub trait UiApp: Send + Sync {
    fn drill_service(&self) -> Arc<DrillService>;

    /// Question count and starting countdown offered on the setup screen.
    fn default_config(&self) -> DrillConfig;
}

#[derive(Clone)]
pub struct AppContext {
    drill_service: Arc<DrillService>,
    default_config: DrillConfig,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            drill_service: app.drill_service(),
            default_config: app.default_config(),
        }
    }

    #[must_use]
    pub fn drill_service(&self) -> Arc<DrillService> {
        Arc::clone(&self.drill_service)
    }

    #[must_use]
    pub fn default_config(&self) -> DrillConfig {
        self.default_config
    }
}

/// The most recent finished drill, shown on the home screen until the next
/// one starts. Lives only as long as the window.
#[derive(Clone, Copy)]
pub struct LastResult(pub Signal<Option<SessionResult>>);

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
