use super::TriviaStore;
use crate::error::StoreError;
use crate::model::{Category, NewQuestion, Question};
use async_trait::async_trait;
use sqlx::PgPool;

// Casts keep decoding stable against older schemas that used INTEGER or TEXT columns.
const QUESTION_COLUMNS: &str = "id::BIGINT AS id, question, answer, \
     category::BIGINT AS category, difficulty::BIGINT AS difficulty";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id::BIGINT AS id, type FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        let row = sqlx::query_as::<_, Category>(
            "SELECT id::BIGINT AS id, type FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        let sql = format!("SELECT {} FROM questions ORDER BY id", QUESTION_COLUMNS);
        let rows = sqlx::query_as::<_, Question>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, StoreError> {
        let sql = format!(
            "SELECT {} FROM questions WHERE category::BIGINT = $1 ORDER BY id",
            QUESTION_COLUMNS
        );
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let sql = format!(
            "SELECT {} FROM questions WHERE question ILIKE $1 ORDER BY id",
            QUESTION_COLUMNS
        );
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count_questions(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create_question(&self, new: &NewQuestion) -> Result<i64, StoreError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING id::BIGINT
            "#,
        )
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.category)
        .bind(new.difficulty)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// `%term%` with LIKE wildcards in `term` escaped (backslash is the default escape).
fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}
