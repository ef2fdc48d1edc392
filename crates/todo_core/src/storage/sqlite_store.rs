use crate::error::AppError;
use crate::model::Todo;
use crate::port::TodoRepository;
use crate::storage::mapper::TodoRow;
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use uuid::Uuid;

const MAX_CONNECTIONS: u32 = 5;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id BLOB PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    completed BOOLEAN NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const CREATE_COMPLETED_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_todos_completed ON todos (completed)";

const COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// Opens a pool for `database_url`, creating the database file when missing,
/// and makes sure the schema exists.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|err| AppError::invalid_input(format!("{database_url}: {err}")))?
        .create_if_missing(true);

    // Every connection to `:memory:` is a separate database.
    let max_connections = if database_url.contains(":memory:") {
        1
    } else {
        MAX_CONNECTIONS
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    migrate(&pool).await?;

    tracing::debug!(database_url, max_connections, "database ready");
    Ok(pool)
}

pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    connect("sqlite::memory:").await
}

async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(CREATE_TABLE).execute(pool).await?;
    sqlx::query(CREATE_COMPLETED_INDEX).execute(pool).await?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn save(&self, todo: &Todo) -> Result<Todo, AppError> {
        let row = TodoRow::from(todo);
        let query = format!(
            "INSERT INTO todos ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                completed = excluded.completed,
                updated_at = excluded.updated_at
             RETURNING {COLUMNS}"
        );
        let saved = sqlx::query_as::<_, TodoRow>(&query)
            .bind(row.id)
            .bind(row.title)
            .bind(row.description)
            .bind(row.completed)
            .bind(row.created_at)
            .bind(row.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(saved.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = ?");
        let row = sqlx::query_as::<_, TodoRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Todo::from))
    }

    async fn find_all(&self) -> Result<Vec<Todo>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM todos ORDER BY rowid");
        let rows = sqlx::query_as::<_, TodoRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM todos WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists != 0)
    }

    async fn find_completed_todos(&self) -> Result<Vec<Todo>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE completed = 1");
        let rows = sqlx::query_as::<_, TodoRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn delete_all(&self, todos: &[Todo]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for todo in todos {
            sqlx::query("DELETE FROM todos WHERE id = ?")
                .bind(todo.id())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
