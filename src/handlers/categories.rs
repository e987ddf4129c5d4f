//! Category endpoints.

use crate::error::AppError;
use crate::model::{CategoryMap, Question};
use crate::response::success_ok;
use crate::service::{paginate, PageQuery};
use crate::state::AppState;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
struct CategoriesBody {
    categories: CategoryMap,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    questions: Vec<Question>,
    current_category: String,
    total_questions: usize,
}

/// GET /categories: `{id: type}` for every category; 404 when the table is empty.
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let categories = CategoryMap::from(state.store.list_categories().await?);
    if categories.is_empty() {
        return Err(AppError::NotFound("no categories".into()));
    }
    Ok(success_ok(CategoriesBody { categories }))
}

/// GET /categories/:id/questions?page=N: one page of the category's questions.
/// `total_questions` counts the whole category, not the page.
pub async fn category_questions(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path.map_err(|e| AppError::NotFound(e.body_text()))?;
    let page = query.map(|Query(q)| q).unwrap_or_default().page();

    let category = state
        .store
        .get_category(id)
        .await?
        .ok_or_else(|| AppError::Unprocessable(format!("unknown category {}", id)))?;

    let questions = state.store.questions_in_category(id).await?;
    Ok(success_ok(CategoryQuestionsBody {
        questions: paginate(&questions, page).to_vec(),
        current_category: category.kind,
        total_questions: questions.len(),
    }))
}
