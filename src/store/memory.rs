//! In-process store with the same ordering and matching rules as [`super::PgStore`].
//! Backs the router tests and local runs without a database.

use super::TriviaStore;
use crate::error::StoreError;
use crate::model::{Category, NewQuestion, Question};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    last_category_id: i64,
    last_question_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the given category names, ids assigned from 1.
    pub fn with_categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        {
            let mut t = store.tables.write().unwrap_or_else(|e| e.into_inner());
            for name in names {
                t.last_category_id += 1;
                let id = t.last_category_id;
                t.categories.insert(id, Category { id, kind: name.into() });
            }
        }
        store
    }

    /// Add a category out of band (the API never writes categories).
    pub fn insert_category(&self, kind: impl Into<String>) -> Result<i64, StoreError> {
        let mut t = self.write()?;
        t.last_category_id += 1;
        let id = t.last_category_id;
        t.categories.insert(id, Category { id, kind: kind.into() });
        Ok(id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }

    fn questions_where<F>(&self, keep: F) -> Result<Vec<Question>, StoreError>
    where
        F: Fn(&Question) -> bool,
    {
        Ok(self
            .read()?
            .questions
            .values()
            .filter(|q| keep(q))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        self.questions_where(|_| true)
    }

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, StoreError> {
        self.questions_where(|q| q.category == category)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let needle = term.to_lowercase();
        self.questions_where(|q| q.question.to_lowercase().contains(&needle))
    }

    async fn count_questions(&self) -> Result<i64, StoreError> {
        Ok(self.read()?.questions.len() as i64)
    }

    async fn create_question(&self, new: &NewQuestion) -> Result<i64, StoreError> {
        let mut t = self.write()?;
        t.last_question_id += 1;
        let id = t.last_question_id;
        t.questions.insert(
            id,
            Question {
                id,
                question: new.question.clone(),
                answer: new.answer.clone(),
                category: new.category,
                difficulty: new.difficulty,
            },
        );
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.write()?.questions.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}
