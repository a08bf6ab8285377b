//! # Trivia Routes
//!
//! Axum handlers for the `/api` endpoints. Each handler parses its input,
//! delegates to the [`QueryEngine`] or [`QuizSelector`], and returns either a
//! success envelope or an [`ApiError`].

use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};

use crate::query::{PageQuery, QueryEngine, QuizSelector};
use crate::store::TriviaStore;

use super::errors::ApiError;
use super::request::{ApiJson, CreateQuestionRequest, IdPath, QuizRequest, SearchRequest};
use super::response::{
    CategoriesResponse, CategoryQuestionsResponse, CreatedResponse, DeletedResponse,
    QuestionsResponse, QuizResponse, SearchResponse,
};

/// Build the routes mounted under `/api`
pub fn api_routes<S: TriviaStore>(engine: QueryEngine<S>) -> Router {
    Router::new()
        .route("/categories", get(list_categories_handler::<S>))
        .route(
            "/categories/{id}/questions",
            get(category_questions_handler::<S>),
        )
        .route(
            "/questions",
            get(list_questions_handler::<S>).post(create_question_handler::<S>),
        )
        .route("/questions/{id}", delete(delete_question_handler::<S>))
        .route("/search", post(search_handler::<S>))
        .route("/quizzes", post(quiz_handler::<S>))
        .with_state(engine)
}

async fn list_categories_handler<S: TriviaStore>(
    State(engine): State<QueryEngine<S>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = engine.list_categories().await?;
    Ok(Json(CategoriesResponse::new(categories)))
}

async fn list_questions_handler<S: TriviaStore>(
    State(engine): State<QueryEngine<S>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let page = engine.list_questions(query.page).await?;
    Ok(Json(page.into()))
}

async fn category_questions_handler<S: TriviaStore>(
    State(engine): State<QueryEngine<S>>,
    IdPath(id): IdPath,
    Query(query): Query<PageQuery>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let result = engine.questions_in_category(id, query.page).await?;
    Ok(Json(result.into()))
}

async fn create_question_handler<S: TriviaStore>(
    State(engine): State<QueryEngine<S>>,
    ApiJson(request): ApiJson<CreateQuestionRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let question = request.validate()?;
    let created = engine.create_question(question).await?;
    Ok(Json(created.into()))
}

async fn delete_question_handler<S: TriviaStore>(
    State(engine): State<QueryEngine<S>>,
    IdPath(id): IdPath,
) -> Result<Json<DeletedResponse>, ApiError> {
    let remaining = engine.delete_question(id).await?;
    Ok(Json(DeletedResponse::new(id, remaining)))
}

async fn search_handler<S: TriviaStore>(
    State(engine): State<QueryEngine<S>>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let results = engine.search(request.search_term.as_deref()).await?;
    Ok(Json(results.into()))
}

async fn quiz_handler<S: TriviaStore>(
    State(engine): State<QueryEngine<S>>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let round = request.into_round()?;
    let question = QuizSelector::next_question(&engine, &round).await?;
    Ok(Json(QuizResponse::new(question)))
}
