//! In-memory trivia store
//!
//! Keeps both tables in id-ordered maps behind a single lock. Used by the
//! test suites and by `serve --in-memory`.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{StoreError, StoreResult};
use super::models::{Category, NewQuestion, Question};
use super::TriviaStore;

#[derive(Debug, Default)]
struct Tables {
    questions: BTreeMap<i32, Question>,
    categories: BTreeMap<i32, Category>,
    next_question_id: i32,
    next_category_id: i32,
}

/// Process-local store with SERIAL-style id assignment (ids start at 1 and
/// are never reused).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Pool("Lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Pool("Lock poisoned".to_string()))
    }

    fn select<F>(&self, predicate: F) -> StoreResult<Vec<Question>>
    where
        F: Fn(&Question) -> bool,
    {
        let tables = self.read()?;
        Ok(tables
            .questions
            .values()
            .filter(|q| predicate(q))
            .cloned()
            .collect())
    }
}

impl TriviaStore for InMemoryStore {
    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        self.select(|_| true)
    }

    async fn count_questions(&self) -> StoreResult<usize> {
        Ok(self.read()?.questions.len())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    async fn find_category(&self, id: i32) -> StoreResult<Option<Category>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    async fn find_question(&self, id: i32) -> StoreResult<Option<Question>> {
        Ok(self.read()?.questions.get(&id).cloned())
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let needle = term.to_lowercase();
        self.select(|q| q.question.to_lowercase().contains(&needle))
    }

    async fn questions_in_category(&self, category: i32) -> StoreResult<Vec<Question>> {
        self.select(|q| q.category == category)
    }

    async fn questions_excluding(
        &self,
        category: Option<i32>,
        excluded: &[i32],
    ) -> StoreResult<Vec<Question>> {
        self.select(|q| {
            category.map_or(true, |c| q.category == c) && !excluded.contains(&q.id)
        })
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<i32> {
        let mut tables = self.write()?;
        tables.next_question_id += 1;
        let id = tables.next_question_id;
        tables.questions.insert(id, question.with_id(id));
        Ok(id)
    }

    async fn delete_question(&self, id: i32) -> StoreResult<bool> {
        Ok(self.write()?.questions.remove(&id).is_some())
    }

    async fn insert_category(&self, kind: &str) -> StoreResult<i32> {
        let mut tables = self.write()?;
        tables.next_category_id += 1;
        let id = tables.next_category_id;
        tables.categories.insert(
            id,
            Category {
                id,
                kind: kind.to_string(),
            },
        );
        Ok(id)
    }
}
