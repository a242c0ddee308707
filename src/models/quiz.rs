use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeAnchor {
    pub value: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuizQuestion {
    #[serde(rename_all = "camelCase")]
    Range {
        id: String,
        min: i64,
        max: i64,
        correct_answer: i64,
        margin: i64,
        anchor: Option<RangeAnchor>,
    },
    #[serde(rename_all = "camelCase")]
    Choice {
        id: String,
        options: Vec<String>,
        correct_answer: String,
    },
}

impl QuizQuestion {
    pub fn id(&self) -> &str {
        match self {
            QuizQuestion::Range { id, .. } | QuizQuestion::Choice { id, .. } => id,
        }
    }

    /// What gets submitted when the user never touches the question.
    /// Range sliders start at the midpoint and that value counts as an answer.
    pub fn default_answer(&self) -> Option<AnswerValue> {
        match self {
            QuizQuestion::Range { min, max, .. } => {
                Some(AnswerValue::Number((min + max).div_euclid(2)))
            }
            QuizQuestion::Choice { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSlide {
    pub id: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(i64),
    Text(String),
}

impl AnswerValue {
    pub fn kind(&self) -> &'static str {
        match self {
            AnswerValue::Number(_) => "number",
            AnswerValue::Text(_) => "text",
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    pub user_answer: Option<AnswerValue>,
    pub correct_answer: AnswerValue,
    pub is_correct: bool,
    pub is_exact: Option<bool>,
    pub margin: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub answers: Vec<AnswerRecord>,
    pub total_correct: u32,
    pub total_questions: u32,
}
