//! API response types
//!
//! Success envelopes, one per endpoint. Every body carries `success: true`
//! next to its payload; failures use [`ErrorResponse`](super::errors::ErrorResponse).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::{CategoryQuestions, CreatedQuestion, QuestionPage, SearchResults};
use crate::store::{Category, Question};

/// `GET /api/categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
    pub total_categories: usize,
}

impl CategoriesResponse {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            success: true,
            total_categories: categories.len(),
            categories,
        }
    }
}

/// `GET /api/questions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub total_questions: usize,
    /// Category id (as a JSON object key) to type label
    pub categories: BTreeMap<i32, String>,
    pub current_category: Option<String>,
    pub questions: Vec<Question>,
}

impl From<QuestionPage> for QuestionsResponse {
    fn from(page: QuestionPage) -> Self {
        Self {
            success: true,
            total_questions: page.total_questions,
            categories: page.categories,
            current_category: None,
            questions: page.questions,
        }
    }
}

/// `GET /api/categories/{id}/questions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub total_questions: usize,
    pub current_category: String,
    pub questions: Vec<Question>,
}

impl From<CategoryQuestions> for CategoryQuestionsResponse {
    fn from(result: CategoryQuestions) -> Self {
        Self {
            success: true,
            total_questions: result.total_questions,
            current_category: result.category.kind,
            questions: result.questions,
        }
    }
}

/// `POST /api/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<String>,
}

impl From<SearchResults> for SearchResponse {
    fn from(results: SearchResults) -> Self {
        Self {
            success: true,
            questions: results.questions,
            total_questions: results.total_questions,
            current_category: None,
        }
    }
}

/// `POST /api/questions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i32,
    pub total_questions: usize,
}

impl From<CreatedQuestion> for CreatedResponse {
    fn from(created: CreatedQuestion) -> Self {
        Self {
            success: true,
            created: created.id,
            total_questions: created.total_questions,
        }
    }
}

/// `DELETE /api/questions/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i32,
    pub total_questions: usize,
}

impl DeletedResponse {
    pub fn new(deleted: i32, total_questions: usize) -> Self {
        Self {
            success: true,
            deleted,
            total_questions,
        }
    }
}

/// `POST /api/quizzes`; `question` is null once the round is exhausted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}

impl QuizResponse {
    pub fn new(question: Option<Question>) -> Self {
        Self {
            success: true,
            question,
        }
    }
}
