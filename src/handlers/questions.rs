//! Question endpoints: paginated listing, creation, search, deletion.

use crate::error::AppError;
use crate::model::{CategoryMap, Question};
use crate::response::success_ok;
use crate::service::{paginate, PageQuery, QuestionPayload, SearchRequest};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
struct QuestionPageBody {
    num_all_questions: usize,
    questions: Vec<Question>,
    categories: CategoryMap,
}

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

#[derive(Serialize)]
struct DeletedBody {
    message: &'static str,
    total_questions: i64,
}

#[derive(Serialize)]
struct SearchBody {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

/// GET /questions?page=N
pub async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.map(|Query(q)| q).unwrap_or_default().page();
    let all = state.store.list_questions().await?;
    let current = paginate(&all, page);
    if current.is_empty() {
        return Err(AppError::NotFound(format!(
            "page {} of {} questions",
            page,
            all.len()
        )));
    }
    let questions = current.to_vec();
    let categories = CategoryMap::from(state.store.list_categories().await?);
    Ok(success_ok(QuestionPageBody {
        num_all_questions: all.len(),
        questions,
        categories,
    }))
}

/// POST /questions: every failure on this route, including a store error, is a 422.
pub async fn post_question(
    State(state): State<AppState>,
    body: Result<Json<QuestionPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = body.map_err(|e| AppError::Unprocessable(e.body_text()))?;
    let new = payload.into_new_question()?;
    let id = state
        .store
        .create_question(&new)
        .await
        .map_err(|e| AppError::Unprocessable(format!("inserting question: {}", e)))?;
    tracing::info!(id, category = new.category, "question created");
    Ok(success_ok(MessageBody {
        message: "Your Question has been added successfully",
    }))
}

/// POST /questions/search: case-insensitive match on the prompt, not paginated.
pub async fn search_questions(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(SearchRequest { search_term }) = body.map_err(|e| AppError::Unprocessable(e.body_text()))?;
    let questions = state
        .store
        .search_questions(&search_term)
        .await
        .map_err(|e| AppError::Unprocessable(format!("searching '{}': {}", search_term, e)))?;
    Ok(success_ok(SearchBody {
        total_questions: questions.len(),
        questions,
        current_category: None,
    }))
}

/// DELETE /questions/:id: any failure, including a store error, is a 404.
pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path.map_err(|e| AppError::NotFound(e.body_text()))?;
    let not_found = |e: crate::error::StoreError| AppError::NotFound(format!("deleting question {}: {}", id, e));

    if !state.store.delete_question(id).await.map_err(not_found)? {
        return Err(AppError::NotFound(format!("question {}", id)));
    }
    let total_questions = state.store.count_questions().await.map_err(not_found)?;
    tracing::info!(id, total_questions, "question deleted");
    Ok(success_ok(DeletedBody {
        message: "Question has been deleted successfully",
        total_questions,
    }))
}
