use std::collections::HashMap;

use crate::error::{StatsError, StatsResult};
use crate::models::{AnswerRecord, AnswerValue, QuizQuestion, QuizResult, QuizSlide};

fn mismatch(question: &QuizQuestion, expected: &'static str, got: &AnswerValue) -> StatsError {
    StatsError::AnswerKindMismatch {
        question_id: question.id().to_string(),
        expected,
        got: got.kind(),
    }
}

/// Score one question. `None` means the user never touched it.
pub fn score_question(
    question: &QuizQuestion,
    answer: Option<&AnswerValue>,
) -> StatsResult<AnswerRecord> {
    match question {
        QuizQuestion::Range {
            id,
            min,
            max,
            correct_answer,
            margin,
            ..
        } => {
            let user = match answer {
                Some(AnswerValue::Number(n)) => *n,
                Some(other) => return Err(mismatch(question, "number", other)),
                None => (min + max).div_euclid(2),
            };
            let is_exact = user == *correct_answer;
            // a negative margin only accepts the exact answer
            let is_correct = is_exact
                || u64::try_from(*margin)
                    .is_ok_and(|margin| user.abs_diff(*correct_answer) <= margin);
            Ok(AnswerRecord {
                question_id: id.clone(),
                user_answer: Some(AnswerValue::Number(user)),
                correct_answer: AnswerValue::Number(*correct_answer),
                is_correct,
                is_exact: Some(is_exact),
                margin: Some(*margin),
            })
        }
        QuizQuestion::Choice {
            id, correct_answer, ..
        } => {
            let user = match answer {
                Some(AnswerValue::Text(s)) => Some(s.clone()),
                Some(other) => return Err(mismatch(question, "text", other)),
                None => None,
            };
            let is_correct = user.as_deref() == Some(correct_answer.as_str());
            Ok(AnswerRecord {
                question_id: id.clone(),
                user_answer: user.map(AnswerValue::Text),
                correct_answer: AnswerValue::Text(correct_answer.clone()),
                is_correct,
                is_exact: None,
                margin: None,
            })
        }
    }
}

/// Score every question in generation order.
pub fn score_quiz(
    slides: &[QuizSlide],
    answers: &HashMap<String, AnswerValue>,
) -> StatsResult<QuizResult> {
    let questions: Vec<&QuizQuestion> = slides.iter().flat_map(|s| &s.questions).collect();

    if let Some(stray) = answers
        .keys()
        .find(|id| !questions.iter().any(|q| q.id() == id.as_str()))
    {
        return Err(StatsError::UnknownQuestion(stray.clone()));
    }

    let records = questions
        .iter()
        .map(|q| score_question(q, answers.get(q.id())))
        .collect::<StatsResult<Vec<_>>>()?;

    Ok(QuizResult {
        total_correct: records.iter().filter(|r| r.is_correct).count() as u32,
        total_questions: records.len() as u32,
        answers: records,
    })
}

/// Answers collected while the user walks through the slides.
#[derive(Debug, Clone)]
pub struct QuizSession {
    slides: Vec<QuizSlide>,
    answers: HashMap<String, AnswerValue>,
}

impl QuizSession {
    pub fn new(slides: Vec<QuizSlide>) -> Self {
        Self {
            slides,
            answers: HashMap::new(),
        }
    }

    pub fn slides(&self) -> &[QuizSlide] {
        &self.slides
    }

    fn question(&self, id: &str) -> StatsResult<&QuizQuestion> {
        self.slides
            .iter()
            .flat_map(|s| &s.questions)
            .find(|q| q.id() == id)
            .ok_or_else(|| StatsError::UnknownQuestion(id.to_string()))
    }

    /// Record (or replace) an answer, rejecting the wrong kind up front.
    pub fn answer(&mut self, id: &str, value: AnswerValue) -> StatsResult<()> {
        let question = self.question(id)?;
        match (question, &value) {
            (QuizQuestion::Range { .. }, AnswerValue::Number(_))
            | (QuizQuestion::Choice { .. }, AnswerValue::Text(_)) => {}
            (QuizQuestion::Range { .. }, other) => return Err(mismatch(question, "number", other)),
            (QuizQuestion::Choice { .. }, other) => return Err(mismatch(question, "text", other)),
        }
        self.answers.insert(id.to_string(), value);
        Ok(())
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn finish(&self) -> StatsResult<QuizResult> {
        score_quiz(&self.slides, &self.answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_q(id: &str, min: i64, max: i64, correct: i64, margin: i64) -> QuizQuestion {
        QuizQuestion::Range {
            id: id.to_string(),
            min,
            max,
            correct_answer: correct,
            margin,
            anchor: None,
        }
    }

    fn choice_q(id: &str, correct: &str) -> QuizQuestion {
        QuizQuestion::Choice {
            id: id.to_string(),
            options: vec!["a".to_string(), "b".to_string(), correct.to_string()],
            correct_answer: correct.to_string(),
        }
    }

    fn slides() -> Vec<QuizSlide> {
        vec![
            QuizSlide {
                id: "one".to_string(),
                questions: vec![range_q("games", 0, 40, 20, 3), choice_q("month", "march")],
            },
            QuizSlide {
                id: "two".to_string(),
                questions: vec![range_q("rank", 1, 9, 2, 1)],
            },
        ]
    }

    #[test]
    fn exact_range_answer_is_exact_and_correct() {
        let r = score_question(&range_q("q", 0, 40, 20, 3), Some(&AnswerValue::Number(20))).unwrap();
        assert_eq!(r.is_exact, Some(true));
        assert!(r.is_correct);
    }

    #[test]
    fn within_margin_is_correct_but_not_exact() {
        let q = range_q("q", 0, 40, 20, 3);
        let r = score_question(&q, Some(&AnswerValue::Number(23))).unwrap();
        assert_eq!(r.is_exact, Some(false));
        assert!(r.is_correct);
        let r = score_question(&q, Some(&AnswerValue::Number(17))).unwrap();
        assert!(r.is_correct);
    }

    #[test]
    fn outside_margin_is_wrong() {
        let r = score_question(&range_q("q", 0, 40, 20, 3), Some(&AnswerValue::Number(24))).unwrap();
        assert!(!r.is_correct);
        assert_eq!(r.is_exact, Some(false));
        assert_eq!(r.margin, Some(3));
    }

    #[test]
    fn extreme_answers_score_as_wrong() {
        let q = range_q("q", 0, 40, 5, 3);
        for n in [i64::MIN, i64::MAX] {
            let r = score_question(&q, Some(&AnswerValue::Number(n))).unwrap();
            assert!(!r.is_correct);
            assert_eq!(r.is_exact, Some(false));
        }
        let low = range_q("q", -10, 0, -5, 3);
        assert!(!score_question(&low, Some(&AnswerValue::Number(i64::MAX))).unwrap().is_correct);

        let answers: HashMap<String, AnswerValue> =
            serde_json::from_str(r#"{"games": -9223372036854775808}"#).unwrap();
        let result = score_quiz(&slides(), &answers).unwrap();
        assert!(!result.answers[0].is_correct);
    }

    #[test]
    fn negative_margin_only_accepts_exact() {
        let q = range_q("q", 0, 40, 20, -1);
        assert!(score_question(&q, Some(&AnswerValue::Number(20))).unwrap().is_correct);
        assert!(!score_question(&q, Some(&AnswerValue::Number(21))).unwrap().is_correct);
    }

    #[test]
    fn untouched_range_submits_the_midpoint() {
        // (0 + 41) / 2 floors to 20
        let r = score_question(&range_q("q", 0, 41, 20, 0), None).unwrap();
        assert_eq!(r.user_answer, Some(AnswerValue::Number(20)));
        assert_eq!(r.is_exact, Some(true));
        assert_eq!(
            range_q("q", 0, 41, 20, 0).default_answer(),
            Some(AnswerValue::Number(20))
        );
    }

    #[test]
    fn choice_needs_exact_match() {
        let q = choice_q("q", "march");
        assert!(score_question(&q, Some(&AnswerValue::Text("march".into()))).unwrap().is_correct);
        assert!(!score_question(&q, Some(&AnswerValue::Text("March".into()))).unwrap().is_correct);
        let skipped = score_question(&q, None).unwrap();
        assert!(!skipped.is_correct);
        assert!(skipped.user_answer.is_none());
        assert!(skipped.is_exact.is_none());
    }

    #[test]
    fn wrong_answer_kind_is_rejected() {
        let err = score_question(&choice_q("q", "x"), Some(&AnswerValue::Number(1))).unwrap_err();
        assert!(matches!(err, StatsError::AnswerKindMismatch { expected: "text", .. }));
    }

    #[test]
    fn quiz_totals_keep_generation_order() {
        let answers: HashMap<String, AnswerValue> = [
            ("rank".to_string(), AnswerValue::Number(2)),
            ("month".to_string(), AnswerValue::Text("april".into())),
        ]
        .into_iter()
        .collect();
        let result = score_quiz(&slides(), &answers).unwrap();
        let ids: Vec<&str> = result.answers.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, vec!["games", "month", "rank"]);
        // games defaults to 20 (exact), month wrong, rank exact
        assert_eq!(result.total_correct, 2);
        assert_eq!(result.total_questions, 3);
    }

    #[test]
    fn answers_for_unknown_questions_fail() {
        let answers: HashMap<String, AnswerValue> =
            [("nope".to_string(), AnswerValue::Number(1))].into_iter().collect();
        assert!(matches!(
            score_quiz(&slides(), &answers),
            Err(StatsError::UnknownQuestion(_))
        ));
    }

    #[test]
    fn session_validates_as_it_goes() {
        let mut session = QuizSession::new(slides());
        session.answer("games", AnswerValue::Number(30)).unwrap();
        session.answer("games", AnswerValue::Number(21)).unwrap();
        assert!(session.answer("rank", AnswerValue::Text("2".into())).is_err());
        assert!(session.answer("missing", AnswerValue::Number(1)).is_err());
        assert_eq!(session.answered(), 1);

        let result = session.finish().unwrap();
        // games 21 within 3, month skipped, rank default 5 outside margin
        assert_eq!(result.total_correct, 1);
    }
}
