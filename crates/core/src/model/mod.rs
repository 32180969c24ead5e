mod answer;
mod config;
mod ids;
mod question;
mod result;

pub use answer::{AnswerRecord, Resolution, sanitize_numeric_input};
pub use config::{
    ConfigError, DEFAULT_QUESTION_COUNT, DEFAULT_SECONDS_PER_QUESTION, DrillConfig,
    MIN_SECONDS_PER_QUESTION, clamp_seconds,
};
pub use ids::{ParseIdError, QuestionId};
pub use question::{MAX_VALUE, MIN_MINUEND, Operator, Problem, Question, QuestionError};
pub use result::{ResultError, SessionResult};
