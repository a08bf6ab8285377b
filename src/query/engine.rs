//! # Query Engine
//!
//! Filtered and ordered selections over a [`TriviaStore`], plus the policy
//! that decides when an empty selection is an error.
//!
//! Plain listings treat an empty page as not-found. Listing the questions of
//! an existing category does not: zero questions there is a normal result.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::errors::{ApiError, ApiResult};
use crate::store::{Category, NewQuestion, Question, StoreError, TriviaStore};

use super::pagination::{paginate, QUESTIONS_PER_PAGE};

/// One page of the global question listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    /// Category id to type label, for every category
    pub categories: BTreeMap<i32, String>,
}

/// One page of a category's questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuestions {
    pub category: Category,
    pub questions: Vec<Question>,
    /// Questions in the category, across all pages
    pub total_questions: usize,
}

/// Id of a new question and the question total including it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedQuestion {
    pub id: i32,
    pub total_questions: usize,
}

/// Search hits, unpaginated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

pub struct QueryEngine<S: TriviaStore> {
    store: Arc<S>,
    page_size: usize,
}

impl<S: TriviaStore> Clone for QueryEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            page_size: self.page_size,
        }
    }
}

fn internal(err: StoreError) -> ApiError {
    ApiError::internal(err.to_string())
}

impl<S: TriviaStore> QueryEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_page_size(store, QUESTIONS_PER_PAGE)
    }

    pub fn with_page_size(store: Arc<S>, page_size: usize) -> Self {
        Self { store, page_size }
    }

    /// All questions by id, paginated. An empty page is not-found.
    pub async fn list_questions(&self, page: i64) -> ApiResult<QuestionPage> {
        let all = self.store.list_questions().await.map_err(internal)?;
        let questions = paginate(&all, page, self.page_size).to_vec();
        if questions.is_empty() {
            return Err(ApiError::not_found(format!("no questions on page {}", page)));
        }

        let categories = self
            .store
            .list_categories()
            .await
            .map_err(internal)?
            .into_iter()
            .map(|c| (c.id, c.kind))
            .collect();

        Ok(QuestionPage {
            questions,
            total_questions: all.len(),
            categories,
        })
    }

    /// All categories by id. No categories at all is not-found.
    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let categories = self.store.list_categories().await.map_err(internal)?;
        if categories.is_empty() {
            return Err(ApiError::not_found("no categories"));
        }
        Ok(categories)
    }

    /// Case-insensitive substring search over question text.
    ///
    /// A missing or blank term is rejected as not-found; zero hits is not.
    /// The term is matched as sent, surrounding whitespace included.
    pub async fn search(&self, term: Option<&str>) -> ApiResult<SearchResults> {
        let term = term
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::not_found("missing search term"))?;

        let questions = self
            .store
            .search_questions(term)
            .await
            .map_err(internal)?;

        Ok(SearchResults {
            total_questions: questions.len(),
            questions,
        })
    }

    /// Questions of one category, paginated.
    ///
    /// An unknown category is not-found and no question query is issued. A
    /// known category with no questions on the requested page is an empty
    /// success.
    pub async fn questions_in_category(
        &self,
        category_id: i32,
        page: i64,
    ) -> ApiResult<CategoryQuestions> {
        let category = self
            .store
            .find_category(category_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| ApiError::not_found(format!("category {}", category_id)))?;

        let all = self
            .store
            .questions_in_category(category.id)
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        Ok(CategoryQuestions {
            questions: paginate(&all, page, self.page_size).to_vec(),
            total_questions: all.len(),
            category,
        })
    }

    /// Questions not in `excluded`, within `category` when one is given
    pub async fn questions_excluding(
        &self,
        category: Option<i32>,
        excluded: &[i32],
    ) -> ApiResult<Vec<Question>> {
        self.store
            .questions_excluding(category, excluded)
            .await
            .map_err(internal)
    }

    /// Insert a validated question. The category must exist.
    ///
    /// The total is counted before the insert. Once the insert commits, no
    /// error is returned.
    pub async fn create_question(&self, question: NewQuestion) -> ApiResult<CreatedQuestion> {
        let category = self
            .store
            .find_category(question.category)
            .await
            .map_err(|e| ApiError::unprocessable(e.to_string()))?;
        if category.is_none() {
            return Err(ApiError::unprocessable(format!(
                "unknown category {}",
                question.category
            )));
        }

        let before = self.count_before_write().await?;
        let id = self
            .store
            .insert_question(question)
            .await
            .map_err(|e| ApiError::unprocessable(e.to_string()))?;
        tracing::info!(id, "question created");

        Ok(CreatedQuestion {
            id,
            total_questions: before + 1,
        })
    }

    /// Delete a question and return how many remain.
    ///
    /// An unknown id is not-found and leaves the store untouched.
    pub async fn delete_question(&self, id: i32) -> ApiResult<usize> {
        self.store
            .find_question(id)
            .await
            .map_err(|e| ApiError::unprocessable(e.to_string()))?
            .ok_or_else(|| ApiError::not_found(format!("question {}", id)))?;

        let before = self.count_before_write().await?;
        let deleted = self
            .store
            .delete_question(id)
            .await
            .map_err(|e| ApiError::unprocessable(e.to_string()))?;
        if !deleted {
            // Removed by a concurrent request between the lookup and the delete
            return Err(ApiError::not_found(format!("question {}", id)));
        }
        tracing::info!(id, "question deleted");

        Ok(before.saturating_sub(1))
    }

    async fn count_before_write(&self) -> ApiResult<usize> {
        self.store
            .count_questions()
            .await
            .map_err(|e| ApiError::unprocessable(e.to_string()))
    }
}
