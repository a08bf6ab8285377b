//! trivia - REST backend for trivia questions, categories and quizzes

pub mod api;
pub mod cli;
pub mod http_server;
pub mod query;
pub mod store;
