//! Question and Category records

use serde::{Deserialize, Serialize};

/// A trivia question as persisted in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: i32,
}

/// A question category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Insert payload for a question; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: i32,
}

impl NewQuestion {
    /// Attach a store-assigned id
    pub fn with_id(self, id: i32) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            difficulty: self.difficulty,
            category: self.category,
        }
    }
}

/// Categories created by `migrate --seed` and the in-memory server
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];
