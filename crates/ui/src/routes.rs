use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{DrillView, HomeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/drill/:seconds", DrillView)] Drill { seconds: u32 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Arithmetic drill (addition / subtraction), timed" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
