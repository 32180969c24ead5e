use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::{AppContext, LastResult};
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{DrillIntent, DrillScreenVm, DrillVm, start_drill};

/// Runs one drill with the given countdown, then returns to the home screen
/// with the result.
#[component]
pub fn DrillView(seconds: u32) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let LastResult(mut last_result) = use_context::<LastResult>();

    let mut drill = use_signal(move || {
        let config = ctx.default_config().with_seconds_per_question(seconds);
        start_drill(&ctx.drill_service(), config)
    });

    // Wire completion and the countdown once per mounted drill. Dropping the
    // view drops the controller, which cancels its timer; the tick task below
    // is owned by this scope and goes with it.
    use_hook(move || {
        let mut guard = drill.write();
        let Ok(vm) = guard.as_mut() else {
            return;
        };
        vm.set_on_finish(move |result| {
            last_result.set(Some(result.clone()));
            navigator.push(Route::Home {});
        });
        let Some(mut ticks) = vm.take_ticks() else {
            return;
        };
        drop(guard);

        spawn(async move {
            while let Some(tick) = ticks.recv().await {
                if let Ok(vm) = drill.write().as_mut() {
                    vm.on_tick(tick);
                }
            }
        });
    });

    let screen: Result<DrillScreenVm, ViewError> = match &*drill.read() {
        Ok(vm) => Ok(vm.screen()),
        Err(err) => Err(*err),
    };

    rsx! {
        div { class: "page",
            match screen {
                Ok(screen) => rsx! {
                    DrillScreen {
                        screen,
                        on_input: move |text: String| {
                            if let Ok(vm) = drill.write().as_mut() {
                                vm.dispatch(DrillIntent::Type(text));
                            }
                        },
                        on_submit: move |question: usize| {
                            if let Ok(vm) = drill.write().as_mut() {
                                vm.dispatch(DrillIntent::Submit { question });
                            }
                        },
                        on_quit: move |()| {
                            if let Ok(vm) = drill.write().as_mut() {
                                vm.abandon();
                            }
                            navigator.push(Route::Home {});
                        },
                    }
                },
                Err(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    button {
                        class: "button",
                        r#type: "button",
                        onclick: move |_| {
                            navigator.push(Route::Home {});
                        },
                        "Back"
                    }
                },
            }
        }
    }
}

#[component]
pub fn DrillScreen(
    screen: DrillScreenVm,
    on_input: Callback<String>,
    on_submit: Callback<usize>,
    on_quit: Callback<()>,
) -> Element {
    let question = screen.question_index;
    let timer_class = if screen.running_low {
        "badge badge--secondary badge--urgent"
    } else {
        "badge badge--secondary"
    };

    rsx! {
        section { class: "drill", id: "drill-root",
            div { class: "drill__status",
                span { class: "badge", "{screen.counter_label}" }
                span { class: "{timer_class}", id: "drill-timer", "{screen.timer_label}" }
                div { class: "spacer" }
                div { class: "progress",
                    div {
                        class: "progress__bar",
                        style: "width: {screen.progress_pct}%",
                    }
                }
            }
            div { class: "card",
                div { class: "drill__prompt", "{screen.prompt}" }
                div { class: "drill__answer",
                    input {
                        id: "drill-answer",
                        class: "drill__input",
                        r#type: "text",
                        pattern: "[0-9]*",
                        placeholder: "Answer with a number",
                        aria_label: "answer",
                        autofocus: true,
                        value: "{screen.input}",
                        oninput: move |evt| on_input.call(evt.value()),
                        onkeydown: move |evt| {
                            if matches!(evt.data.key(), Key::Enter) {
                                evt.prevent_default();
                                on_submit.call(question);
                            }
                        },
                    }
                    button {
                        id: "drill-submit",
                        class: "button button--primary",
                        r#type: "button",
                        onclick: move |_| on_submit.call(question),
                        "Submit"
                    }
                }
            }
            button {
                id: "drill-quit",
                class: "button button--ghost",
                r#type: "button",
                onclick: move |_| on_quit.call(()),
                "Quit"
            }
        }
    }
}
