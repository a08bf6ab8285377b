//! # Quiz Selector
//!
//! Picks the next quiz question uniformly at random from the candidate set:
//! the questions of the round's category (or all questions) minus the ones
//! already asked. An exhausted candidate set ends the quiz with no question,
//! which is not an error.

use rand::Rng;

use crate::api::errors::ApiResult;
use crate::store::{Question, TriviaStore};

use super::engine::QueryEngine;

/// State the client sends for each quiz round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRound {
    /// `None` draws from every category
    pub category: Option<i32>,
    /// Ids of questions already asked
    pub previous: Vec<i32>,
}

pub struct QuizSelector;

impl QuizSelector {
    /// Next question for `round`, drawn with the thread-local RNG
    pub async fn next_question<S: TriviaStore>(
        engine: &QueryEngine<S>,
        round: &QuizRound,
    ) -> ApiResult<Option<Question>> {
        let candidates = engine
            .questions_excluding(round.category, &round.previous)
            .await?;
        tracing::debug!(
            category = ?round.category,
            asked = round.previous.len(),
            candidates = candidates.len(),
            "quiz round"
        );

        Ok(Self::choose(candidates, &mut rand::thread_rng()))
    }

    /// Uniform choice from `candidates`; `None` when there are none
    pub fn choose<R: Rng + ?Sized>(mut candidates: Vec<Question>, rng: &mut R) -> Option<Question> {
        if candidates.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..candidates.len());
        Some(candidates.swap_remove(index))
    }
}
