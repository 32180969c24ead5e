//! Random two-digit addition and subtraction questions.
//!
//! The random source is always passed in; seed a `StdRng` for repeatable
//! batches.

use rand::Rng;

use crate::model::{MAX_VALUE, MIN_MINUEND, Operator, Problem, Question, QuestionId};

/// Generate `count` questions in order.
///
/// Each slot picks addition or subtraction with equal odds, independently
/// of the others. Ids come from the same random source.
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Question> {
    (0..count).map(|_| generate_one(rng)).collect()
}

fn generate_one<R: Rng + ?Sized>(rng: &mut R) -> Question {
    let operator = if rng.random_bool(0.5) {
        Operator::Add
    } else {
        Operator::Subtract
    };
    let problem = draw_problem(operator, rng);
    Question::from_problem(QuestionId::random(rng), problem)
}

fn draw_problem<R: Rng + ?Sized>(operator: Operator, rng: &mut R) -> Problem {
    let left = rng.random_range(MIN_MINUEND..=MAX_VALUE);
    let right = match operator {
        Operator::Add => rng.random_range(0..=MAX_VALUE - left),
        Operator::Subtract => rng.random_range(0..=left),
    };
    Problem::drawn(operator, left, right)
}
