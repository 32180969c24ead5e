use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::LastResult;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    use_context_provider(|| LastResult(Signal::new(None)));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Arithmetic Drill" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
