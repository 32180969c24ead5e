use drill_core::model::{AnswerRecord, SessionResult};

use crate::vm::time_fmt::format_elapsed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub key: String,
    pub number: usize,
    pub correct: bool,
    pub verdict: &'static str,
    pub points: &'static str,
    pub prompt: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub timed_out: bool,
}

impl ReviewRowVm {
    fn new(number: usize, record: &AnswerRecord) -> Self {
        Self {
            key: record.question_id.to_string(),
            number,
            correct: record.correct,
            verdict: if record.correct { "Correct" } else { "Wrong" },
            points: if record.correct { "+1" } else { "+0" },
            prompt: record.prompt.clone(),
            user_answer: if record.is_blank() {
                "(blank)".to_string()
            } else {
                record.user_input.clone()
            },
            correct_answer: record.correct_answer.clone(),
            timed_out: record.timed_out(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub score_label: String,
    pub percent: u32,
    pub elapsed_label: String,
    pub timed_out: usize,
    pub rows: Vec<ReviewRowVm>,
}

impl From<&SessionResult> for ReviewVm {
    fn from(result: &SessionResult) -> Self {
        let total = result.total();
        let percent = if total == 0 {
            0
        } else {
            let score = usize::try_from(result.score()).unwrap_or(usize::MAX);
            u32::try_from((score * 100 + total / 2) / total).unwrap_or(100)
        };
        Self {
            score_label: format!("{} / {}", result.score(), total),
            percent,
            elapsed_label: format_elapsed(result.elapsed()),
            timed_out: result.timed_out_count(),
            rows: result
                .results()
                .iter()
                .enumerate()
                .map(|(idx, record)| ReviewRowVm::new(idx + 1, record))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use drill_core::model::{Question, QuestionId, Resolution};
    use drill_core::time::fixed_now;

    fn id(n: u8) -> QuestionId {
        format!("00000000-0000-4000-8000-0000000000{n:02}")
            .parse()
            .unwrap()
    }

    fn result() -> SessionResult {
        let q1 = Question::new(id(1), "20 + 5 = ?", "25");
        let q2 = Question::new(id(2), "30 \u{2212} 10 = ?", "20");
        let q3 = Question::new(id(3), "50 + 49 = ?", "99");
        let records = vec![
            AnswerRecord::evaluate(&q1, "25", Resolution::Submitted),
            AnswerRecord::evaluate(&q2, "", Resolution::TimedOut),
            AnswerRecord::evaluate(&q3, "98", Resolution::Submitted),
        ];
        SessionResult::from_records(records, 3, fixed_now(), fixed_now() + Duration::seconds(75))
            .unwrap()
    }

    #[test]
    fn header_shows_score_and_time() {
        let vm = ReviewVm::from(&result());
        assert_eq!(vm.score_label, "1 / 3");
        assert_eq!(vm.percent, 33);
        assert_eq!(vm.elapsed_label, "1:15");
        assert_eq!(vm.timed_out, 1);
    }

    #[test]
    fn rows_follow_question_order() {
        let vm = ReviewVm::from(&result());
        let numbers: Vec<usize> = vm.rows.iter().map(|row| row.number).collect();
        assert_eq!(numbers, [1, 2, 3]);
        assert_eq!(vm.rows[0].key, id(1).to_string());
    }

    #[test]
    fn rows_describe_each_answer() {
        let vm = ReviewVm::from(&result());
        let first = &vm.rows[0];
        assert_eq!((first.verdict, first.points), ("Correct", "+1"));

        let blank = &vm.rows[1];
        assert_eq!(blank.user_answer, "(blank)");
        assert_eq!(blank.correct_answer, "20");
        assert!(blank.timed_out);

        let wrong = &vm.rows[2];
        assert_eq!((wrong.verdict, wrong.points), ("Wrong", "+0"));
        assert_eq!(wrong.user_answer, "98");
    }
}
