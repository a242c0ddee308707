pub mod generator;
pub mod scoring;

pub use generator::{generate_quiz, question_count, QuizContext};
pub use scoring::{score_question, score_quiz, QuizSession};
