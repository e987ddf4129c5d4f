//! Repository layer. Records are plain data; every read and write goes through a [`TriviaStore`].

use crate::error::StoreError;
use crate::model::{Category, NewQuestion, Question};
use async_trait::async_trait;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

// Shared across request tasks behind an Arc; sqlx::PgPool is already Send + Sync.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories, id ascending.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
    async fn get_category(&self, id: i64) -> Result<Option<Category>, StoreError>;

    /// All questions, id ascending.
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError>;
    /// Questions whose `category` equals `category`, id ascending.
    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, StoreError>;
    /// Case-insensitive substring match on the question text, id ascending.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError>;
    async fn count_questions(&self) -> Result<i64, StoreError>;

    /// Persist a question and return its new id.
    async fn create_question(&self, new: &NewQuestion) -> Result<i64, StoreError>;
    /// Remove a question. `false` when no row had that id.
    async fn delete_question(&self, id: i64) -> Result<bool, StoreError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
