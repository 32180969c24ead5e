use dioxus::prelude::*;
use drill_core::model::{AnswerRecord, Question, QuestionId, Resolution, SessionResult};
use drill_core::time::fixed_now;

use super::test_harness::{ScreenHarness, ScreenHarnessProps, ViewKind, setup_view_harness};
use crate::views::review::ReviewPanelProps;
use crate::views::ReviewPanel;
use crate::vm::{DrillScreenVm, ReviewVm};

fn finished_result() -> SessionResult {
    let ids = [
        "00000000-0000-4000-8000-000000000001",
        "00000000-0000-4000-8000-000000000002",
        "00000000-0000-4000-8000-000000000003",
    ];
    let questions: Vec<Question> = ids
        .iter()
        .zip([
            ("20 + 5 = ?", "25"),
            ("30 \u{2212} 10 = ?", "20"),
            ("50 + 49 = ?", "99"),
        ])
        .map(|(id, (prompt, answer))| {
            Question::new(id.parse::<QuestionId>().unwrap(), prompt, answer)
        })
        .collect();
    let records = vec![
        AnswerRecord::evaluate(&questions[0], "25", Resolution::Submitted),
        AnswerRecord::evaluate(&questions[1], "", Resolution::TimedOut),
        AnswerRecord::evaluate(&questions[2], "99", Resolution::Submitted),
    ];
    let now = fixed_now();
    SessionResult::from_records(records, 3, now, now + chrono::Duration::seconds(75)).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_setup() {
    let mut harness = setup_view_harness(ViewKind::Home, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("3 questions"), "missing count in {html}");
    assert!(html.contains("Start drill"), "missing start button in {html}");
    assert!(!html.contains("Try again"), "unexpected retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_last_result() {
    let mut harness = setup_view_harness(ViewKind::Home, Some(finished_result()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("2 / 3"), "missing score in {html}");
    assert!(html.contains("67% in 1:15"), "missing percent in {html}");
    assert!(html.contains("1 timed out"), "missing timeout count in {html}");
    assert!(html.contains("Try again"), "missing retry in {html}");
    assert!(html.contains("(blank)"), "missing blank marker in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn drill_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Drill(15), None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 / 3"), "missing counter in {html}");
    assert!(html.contains("Time: 15s"), "missing countdown in {html}");
    assert!(html.contains("= ?"), "missing prompt in {html}");
    assert!(html.contains("width: 0%"), "missing progress in {html}");
}

#[test]
fn drill_screen_marks_low_time() {
    let screen = DrillScreenVm {
        question_index: 4,
        counter_label: "Question 5 / 10".to_string(),
        timer_label: "Time: 2s".to_string(),
        progress_pct: 40,
        prompt: "42 \u{2212} 17 = ?".to_string(),
        input: "2".to_string(),
        running_low: true,
        completed: false,
    };
    let mut dom =
        VirtualDom::new_with_props(ScreenHarness, ScreenHarnessProps::builder().screen(screen).build());
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("badge--urgent"), "missing urgent class in {html}");
    assert!(html.contains("width: 40%"), "missing progress in {html}");
    assert!(html.contains("42 \u{2212} 17 = ?"), "missing prompt in {html}");
}

#[test]
fn review_panel_lists_every_question() {
    let review = ReviewVm::from(&finished_result());
    let mut dom =
        VirtualDom::new_with_props(ReviewPanel, ReviewPanelProps::builder().review(review).build());
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert_eq!(html.matches("review-card__header").count(), 3, "{html}");
    assert!(html.contains("30 \u{2212} 10 = ?"), "missing prompt in {html}");
    assert!(html.contains("Timed out"), "missing timeout badge in {html}");
}
