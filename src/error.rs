//! Errors raised at the library boundary.
//!
//! Only contract violations end up here. Odd but well-formed data (empty
//! rosters, malformed date strings, seasons without games) degrades to zeroed
//! results instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Invalid {what} input: {reason}")]
    InvalidInput { what: &'static str, reason: String },

    #[error("Player '{0}' is not in the roster")]
    UnknownPlayer(String),

    #[error("Question '{0}' does not exist")]
    UnknownQuestion(String),

    #[error("Question '{question_id}' expects a {expected} answer, got {got}")]
    AnswerKindMismatch {
        question_id: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

pub type StatsResult<T> = Result<T, StatsError>;
