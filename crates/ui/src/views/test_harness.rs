use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use drill_core::model::{DrillConfig, SessionResult};
use drill_core::time::fixed_clock;
use services::DrillService;

use crate::context::{LastResult, UiApp, build_app_context};
use crate::views::{DrillScreen, DrillView, HomeView};
use crate::vm::DrillScreenVm;

const HARNESS_SEED: u64 = 7;

struct TestApp {
    drill_service: Arc<DrillService>,
    default_config: DrillConfig,
}

impl UiApp for TestApp {
    fn drill_service(&self) -> Arc<DrillService> {
        Arc::clone(&self.drill_service)
    }

    fn default_config(&self) -> DrillConfig {
        self.default_config
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Drill(u32),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    last_result: Option<SessionResult>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    let seeded = props.last_result.clone();
    use_context_provider(move || LastResult(Signal::new(seeded)));
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
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Drill(seconds) => rsx! { DrillView { seconds } },
    }
}

/// Renders `DrillScreen` with inert callbacks.
#[component]
pub fn ScreenHarness(screen: DrillScreenVm) -> Element {
    rsx! {
        DrillScreen {
            screen,
            on_input: move |_: String| {},
            on_submit: move |_: usize| {},
            on_quit: move |()| {},
        }
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

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, last_result: Option<SessionResult>) -> ViewHarness {
    let config = DrillConfig::new(3, 10).expect("harness config");
    let app = Arc::new(TestApp {
        drill_service: Arc::new(DrillService::new(fixed_clock()).with_seed(HARNESS_SEED)),
        default_config: config,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            last_result,
        },
    );

    ViewHarness { dom }
}
