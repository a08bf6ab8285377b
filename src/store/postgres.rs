//! PostgreSQL trivia store
//!
//! Backed by a `deadpool-postgres` pool. Every trait method checks out one
//! connection and runs exactly one statement.

use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use serde::{Deserialize, Serialize};
use tokio_postgres::{NoTls, Row};

use super::errors::{StoreError, StoreResult};
use super::models::{Category, NewQuestion, Question};
use super::TriviaStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id   SERIAL PRIMARY KEY,
    type TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS questions (
    id         SERIAL PRIMARY KEY,
    question   TEXT NOT NULL,
    answer     TEXT NOT NULL,
    difficulty INTEGER NOT NULL,
    category   INTEGER NOT NULL
);
"#;

const QUESTION_COLUMNS: &str = "id, question, answer, difficulty, category";

/// Connection settings for the PostgreSQL store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; takes precedence over the individual fields
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default = "default_dbname")]
    pub dbname: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    /// Upper bound on pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_dbname() -> String {
    "trivia".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_max_connections() -> usize {
    16
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: default_db_host(),
            port: default_db_port(),
            dbname: default_dbname(),
            user: default_user(),
            password: String::new(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// Build a connection URL, preferring an explicit `url`
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None if self.password.is_empty() => format!(
                "postgres://{}@{}:{}/{}",
                self.user, self.host, self.port, self.dbname
            ),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.dbname
            ),
        }
    }

    /// Connection target without credentials, for logs
    fn display_target(&self) -> String {
        match &self.url {
            Some(url) => url
                .rsplit_once('@')
                .map(|(_, target)| target.to_string())
                .unwrap_or_else(|| "<url>".to_string()),
            None => format!("{}:{}/{}", self.host, self.port, self.dbname),
        }
    }
}

/// Trivia store over a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: Pool,
}

impl PostgresStore {
    /// Create the pool and verify one connection can be established
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        tracing::info!(target = %config.display_target(), "connecting to database");

        let mut cfg = Config::new();
        cfg.url = Some(config.connection_url());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });
        cfg.pool = Some(PoolConfig::new(config.max_connections));

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| StoreError::Pool(format!("Pool creation failed: {}", e)))?;

        // Fail at boot rather than on the first request
        let _client = pool.get().await?;
        tracing::info!("database connection established");

        Ok(Self { pool })
    }

    /// Create both tables if they do not exist yet
    pub async fn migrate(&self) -> StoreResult<()> {
        let client = self.pool.get().await?;
        client.batch_execute(SCHEMA).await?;
        tracing::info!("schema is up to date");
        Ok(())
    }

    async fn query_questions(
        &self,
        filter: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> StoreResult<Vec<Question>> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {} FROM questions {} ORDER BY id",
            QUESTION_COLUMNS, filter
        );
        let rows = client.query(sql.as_str(), params).await?;
        rows.iter().map(question_from_row).collect()
    }
}

fn question_from_row(row: &Row) -> StoreResult<Question> {
    let corrupt = |e: tokio_postgres::Error| StoreError::Corrupt(e.to_string());
    Ok(Question {
        id: row.try_get("id").map_err(corrupt)?,
        question: row.try_get("question").map_err(corrupt)?,
        answer: row.try_get("answer").map_err(corrupt)?,
        difficulty: row.try_get("difficulty").map_err(corrupt)?,
        category: row.try_get("category").map_err(corrupt)?,
    })
}

fn category_from_row(row: &Row) -> StoreResult<Category> {
    let corrupt = |e: tokio_postgres::Error| StoreError::Corrupt(e.to_string());
    Ok(Category {
        id: row.try_get("id").map_err(corrupt)?,
        kind: row.try_get("type").map_err(corrupt)?,
    })
}

/// Escape LIKE wildcards so the term matches literally
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl TriviaStore for PostgresStore {
    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        self.query_questions("", &[]).await
    }

    async fn count_questions(&self) -> StoreResult<usize> {
        let client = self.pool.get().await?;
        let row = client.query_one("SELECT COUNT(*) FROM questions", &[]).await?;
        let count: i64 = row
            .try_get(0)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        usize::try_from(count).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let client = self.pool.get().await?;
        let rows = client
            .query("SELECT id, type FROM categories ORDER BY id", &[])
            .await?;
        rows.iter().map(category_from_row).collect()
    }

    async fn find_category(&self, id: i32) -> StoreResult<Option<Category>> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt("SELECT id, type FROM categories WHERE id = $1", &[&id])
            .await?;
        row.as_ref().map(category_from_row).transpose()
    }

    async fn find_question(&self, id: i32) -> StoreResult<Option<Question>> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM questions WHERE id = $1", QUESTION_COLUMNS);
        let row = client.query_opt(sql.as_str(), &[&id]).await?;
        row.as_ref().map(question_from_row).transpose()
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let pattern = like_pattern(term);
        self.query_questions("WHERE question ILIKE $1", &[&pattern])
            .await
    }

    async fn questions_in_category(&self, category: i32) -> StoreResult<Vec<Question>> {
        self.query_questions("WHERE category = $1", &[&category])
            .await
    }

    async fn questions_excluding(
        &self,
        category: Option<i32>,
        excluded: &[i32],
    ) -> StoreResult<Vec<Question>> {
        self.query_questions(
            "WHERE ($1::INTEGER IS NULL OR category = $1) AND NOT (id = ANY($2))",
            &[&category, &excluded],
        )
        .await
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<i32> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO questions (question, answer, difficulty, category) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
                &[
                    &question.question,
                    &question.answer,
                    &question.difficulty,
                    &question.category,
                ],
            )
            .await?;
        let id: i32 = row
            .try_get(0)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        tracing::debug!(id, "inserted question");
        Ok(id)
    }

    async fn delete_question(&self, id: i32) -> StoreResult<bool> {
        let client = self.pool.get().await?;
        let affected = client
            .execute("DELETE FROM questions WHERE id = $1", &[&id])
            .await?;
        Ok(affected > 0)
    }

    async fn insert_category(&self, kind: &str) -> StoreResult<i32> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO categories (type) VALUES ($1) RETURNING id",
                &[&kind],
            )
            .await?;
        row.try_get(0)
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}
