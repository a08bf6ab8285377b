//! API request types
//!
//! JSON bodies accepted by the write, search and quiz endpoints, and the
//! [`ApiJson`] and [`IdPath`] extractors that report failures through
//! [`ApiError`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::query::QuizRound;
use crate::store::NewQuestion;

use super::errors::{ApiError, ApiResult};

/// Accepted difficulty range
pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

/// JSON body extractor with envelope-shaped rejections.
///
/// A body that parses but does not fit the target type is unprocessable;
/// anything else (bad syntax, wrong content type) is a bad request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY {
            ApiError::unprocessable(rejection.body_text())
        } else {
            ApiError::bad_request(rejection.body_text())
        }
    }
}

/// Integer id from the `{id}` path segment.
///
/// A segment that is not a 32-bit integer cannot name any record, so it is
/// reported as not-found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::not_found(rejection.body_text()))?;
        Ok(IdPath(id))
    }
}

/// Integer that may arrive as a JSON number or a numeric string
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("not a 32-bit integer: {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("not an integer: {:?}", s))),
        Some(other) => Err(D::Error::custom(format!("expected integer, got {}", other))),
    }
}

/// `POST /api/questions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub difficulty: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub category: Option<i32>,
}

/// Text must not be blank; it is stored exactly as sent
fn required_text(field: &str, value: Option<String>) -> ApiResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::unprocessable(format!("missing {}", field)))
}

impl CreateQuestionRequest {
    /// Check required fields and ranges
    pub fn validate(self) -> ApiResult<NewQuestion> {
        let question = required_text("question", self.question)?;
        let answer = required_text("answer", self.answer)?;
        let difficulty = self
            .difficulty
            .ok_or_else(|| ApiError::unprocessable("missing difficulty"))?;
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(ApiError::unprocessable(format!(
                "difficulty {} outside {}..={}",
                difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY
            )));
        }
        let category = self
            .category
            .ok_or_else(|| ApiError::unprocessable("missing category"))?;

        Ok(NewQuestion {
            question,
            answer,
            difficulty,
            category,
        })
    }
}

/// `POST /api/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

/// Category selector of a quiz request; a null `id` means every category
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "lenient_int")]
    pub id: Option<i32>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// `POST /api/quizzes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i32>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

impl QuizRequest {
    /// A request without `quiz_category` is malformed
    pub fn into_round(self) -> ApiResult<QuizRound> {
        let category = self
            .quiz_category
            .ok_or_else(|| ApiError::unprocessable("missing quiz_category"))?;
        Ok(QuizRound {
            category: category.id,
            previous: self.previous_questions,
        })
    }
}
