use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::{AppContext, LastResult};
use crate::routes::Route;
use crate::views::ReviewPanel;
use crate::vm::{ReviewVm, parse_seconds_input};

/// Setup screen: countdown length, start button, and the last result if any.
#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let LastResult(mut last_result) = use_context::<LastResult>();
    let defaults = ctx.default_config();
    let question_count = defaults.question_count();
    let mut seconds = use_signal(|| defaults.seconds_per_question());

    let review = last_result.read().as_ref().map(ReviewVm::from);
    let start = move |_: MouseEvent| {
        last_result.set(None);
        navigator.push(Route::Drill {
            seconds: seconds(),
        });
    };

    rsx! {
        div { class: "page",
            div { class: "drill-setup",
                p { class: "muted", "{question_count} questions \u{2022} {seconds} s per question" }
                label { class: "drill-setup__seconds",
                    "Seconds per question"
                    input {
                        id: "seconds-per-question",
                        r#type: "number",
                        min: "3",
                        max: "120",
                        value: "{seconds}",
                        aria_label: "seconds per question",
                        title: "seconds per question",
                        oninput: move |evt| seconds.set(parse_seconds_input(&evt.value())),
                    }
                }
                span { class: "badge badge--outline", "Adjustable" }
            }
            match review {
                None => rsx! {
                    button {
                        id: "start-drill",
                        class: "button button--primary",
                        r#type: "button",
                        onclick: start,
                        "Start drill"
                    }
                },
                Some(review) => rsx! {
                    ReviewPanel { review }
                    button {
                        id: "retry-drill",
                        class: "button button--primary",
                        r#type: "button",
                        onclick: start,
                        "Try again"
                    }
                },
            }
        }
    }
}
