use crate::error::AppError;
use crate::model::Question;
use crate::response::success_ok;
use crate::service::{select_question, QuizRequest};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
struct QuizBody {
    question: Option<Question>,
}

/// POST /quizzes: a random question from the chosen category (or all) not in
/// `previous_questions`; `null` once none remain. Every failure is a 400.
pub async fn play_quiz(
    State(state): State<AppState>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let category = request.category_id()?;
    let previous = request.previous_ids()?;

    let pool = match category {
        Some(id) => state.store.questions_in_category(id).await,
        None => state.store.list_questions().await,
    }
    .map_err(|e| AppError::BadRequest(format!("loading quiz candidates: {}", e)))?;

    let question = select_question(pool, &previous, &mut rand::rng());
    tracing::debug!(
        ?category,
        served = previous.len(),
        picked = question.as_ref().map(|q| q.id),
        "quiz round"
    );
    Ok(success_ok(QuizBody { question }))
}
