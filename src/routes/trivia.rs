//! Trivia API routes.

use crate::handlers::{
    category_questions, delete_question, list_categories, list_questions, play_quiz, post_question,
    search_questions,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn trivia_routes(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:id/questions", get(category_questions))
        .route("/questions", get(list_questions).post(post_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/:id", delete(delete_question))
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
