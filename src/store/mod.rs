//! # Trivia Store
//!
//! Data access for questions and categories. Handlers and the query engine
//! receive a store explicitly (`Arc<S>`) rather than reaching for a global
//! connection.
//!
//! Two adapters implement [`TriviaStore`]:
//! - [`PostgresStore`] - pooled PostgreSQL connections
//! - [`InMemoryStore`] - process-local tables for tests and `--in-memory`

pub mod errors;
pub mod memory;
pub mod models;
pub mod postgres;

use std::future::Future;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use models::{Category, NewQuestion, Question, DEFAULT_CATEGORIES};
pub use postgres::{DatabaseConfig, PostgresStore};

/// CRUD access to the two trivia entities.
///
/// Every list operation returns records ordered by id ascending. Each call is
/// a single statement against the store; there are no multi-call transactions.
pub trait TriviaStore: Send + Sync + 'static {
    /// All questions
    fn list_questions(&self) -> impl Future<Output = StoreResult<Vec<Question>>> + Send;

    /// Number of persisted questions
    fn count_questions(&self) -> impl Future<Output = StoreResult<usize>> + Send;

    /// All categories
    fn list_categories(&self) -> impl Future<Output = StoreResult<Vec<Category>>> + Send;

    fn find_category(&self, id: i32)
        -> impl Future<Output = StoreResult<Option<Category>>> + Send;

    fn find_question(&self, id: i32)
        -> impl Future<Output = StoreResult<Option<Question>>> + Send;

    /// Questions whose text contains `term`, ignoring case
    fn search_questions(&self, term: &str)
        -> impl Future<Output = StoreResult<Vec<Question>>> + Send;

    fn questions_in_category(
        &self,
        category: i32,
    ) -> impl Future<Output = StoreResult<Vec<Question>>> + Send;

    /// Questions not in `excluded`, restricted to `category` when given
    fn questions_excluding(
        &self,
        category: Option<i32>,
        excluded: &[i32],
    ) -> impl Future<Output = StoreResult<Vec<Question>>> + Send;

    /// Insert a question and return its assigned id
    fn insert_question(&self, question: NewQuestion)
        -> impl Future<Output = StoreResult<i32>> + Send;

    /// Delete a question; `false` when no row had that id
    fn delete_question(&self, id: i32) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Insert a category and return its assigned id
    fn insert_category(&self, kind: &str) -> impl Future<Output = StoreResult<i32>> + Send;
}

/// Insert [`DEFAULT_CATEGORIES`] when the store has no categories yet.
///
/// Returns the number of categories inserted.
pub async fn seed_default_categories<S: TriviaStore>(store: &S) -> StoreResult<usize> {
    if !store.list_categories().await?.is_empty() {
        return Ok(0);
    }

    for kind in DEFAULT_CATEGORIES {
        store.insert_category(kind).await?;
    }

    tracing::info!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
    Ok(DEFAULT_CATEGORIES.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = InMemoryStore::new();

        assert_eq!(seed_default_categories(&store).await.unwrap(), 6);
        assert_eq!(seed_default_categories(&store).await.unwrap(), 0);

        let categories = store.list_categories().await.unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].kind, "Science");
        assert_eq!(categories[5].kind, "Sports");
    }
}
