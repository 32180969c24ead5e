use dioxus::prelude::*;

use crate::vm::{ReviewRowVm, ReviewVm};

#[component]
pub fn ReviewPanel(review: ReviewVm) -> Element {
    rsx! {
        section { class: "review",
            div { class: "review__header",
                span { class: "badge badge--secondary", "Score" }
                div { class: "review__score", "{review.score_label}" }
                span { class: "muted", "{review.percent}% in {review.elapsed_label}" }
                if review.timed_out > 0 {
                    span { class: "muted", "{review.timed_out} timed out" }
                }
            }
            ol { class: "review__list",
                for row in review.rows.iter() {
                    ReviewRow { key: "{row.key}", row: row.clone() }
                }
            }
        }
    }
}

#[component]
fn ReviewRow(row: ReviewRowVm) -> Element {
    let verdict_class = if row.correct { "badge" } else { "badge badge--destructive" };

    rsx! {
        li { class: "review-card",
            div { class: "review-card__header",
                span { class: "muted", "#{row.number}" }
                span { class: "{verdict_class}", "{row.verdict}" }
                if row.timed_out {
                    span { class: "badge badge--outline", "Timed out" }
                }
                span { class: "review-card__points", "{row.points}" }
            }
            // Label/value pairs.
            dl { class: "review-card__body",
                dt { "Question" }
                dd { class: "strong", "{row.prompt}" }
                dt { "Your answer" }
                dd { class: "mono", "{row.user_answer}" }
                dt { "Correct answer" }
                dd { class: "mono", "{row.correct_answer}" }
            }
        }
    }
}
