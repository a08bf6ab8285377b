//! # Question Queries
//!
//! Pagination, filtered selections and quiz selection over a trivia store.

pub mod engine;
pub mod pagination;
pub mod quiz;

pub use engine::{CategoryQuestions, CreatedQuestion, QueryEngine, QuestionPage, SearchResults};
pub use pagination::{paginate, PageQuery, QUESTIONS_PER_PAGE};
pub use quiz::{QuizRound, QuizSelector};
