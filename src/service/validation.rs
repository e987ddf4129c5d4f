//! Request payloads and their checks.

use crate::error::AppError;
use crate::model::NewQuestion;
use serde::Deserialize;

/// Integer field that clients send either as a number or as a numeric string (`"1"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    Int(i64),
    Text(String),
}

impl LooseInt {
    pub fn to_i64(&self, field: &str) -> Result<i64, AppError> {
        match self {
            LooseInt::Int(n) => Ok(*n),
            LooseInt::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| AppError::Unprocessable(format!("{} is not an integer: '{}'", field, s))),
        }
    }
}

/// Body of `POST /questions`.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionPayload {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<LooseInt>,
    pub difficulty: Option<LooseInt>,
}

/// Body of `POST /questions/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

impl QuestionPayload {
    /// All four fields must be present and non-null.
    pub fn into_new_question(self) -> Result<NewQuestion, AppError> {
        let question = self.question.ok_or_else(|| missing("question"))?;
        let answer = self.answer.ok_or_else(|| missing("answer"))?;
        let category = self.category.ok_or_else(|| missing("category"))?;
        let difficulty = self.difficulty.ok_or_else(|| missing("difficulty"))?;
        Ok(NewQuestion {
            question,
            answer,
            category: category.to_i64("category")?,
            difficulty: difficulty.to_i64("difficulty")?,
        })
    }
}

fn missing(field: &str) -> AppError {
    AppError::Unprocessable(format!("{} is required", field))
}

/// Body of `POST /quizzes`.
#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    pub quiz_category: Option<QuizCategory>,
    pub previous_questions: Option<Vec<LooseInt>>,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    pub id: Option<LooseInt>,
}

impl QuizRequest {
    /// Category filter, if any. A category object without a usable id is a bad request.
    pub fn category_id(&self) -> Result<Option<i64>, AppError> {
        match &self.quiz_category {
            None => Ok(None),
            Some(QuizCategory { id: None }) => {
                Err(AppError::BadRequest("quiz_category has no id".into()))
            }
            Some(QuizCategory { id: Some(id) }) => id
                .to_i64("quiz_category.id")
                .map(Some)
                .map_err(|e| AppError::BadRequest(e.to_string())),
        }
    }

    pub fn previous_ids(&self) -> Result<Vec<i64>, AppError> {
        self.previous_questions
            .iter()
            .flatten()
            .map(|id| {
                id.to_i64("previous_questions")
                    .map_err(|e| AppError::BadRequest(e.to_string()))
            })
            .collect()
    }
}
