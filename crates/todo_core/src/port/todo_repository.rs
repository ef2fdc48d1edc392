use crate::error::AppError;
use crate::model::Todo;
use async_trait::async_trait;
use uuid::Uuid;

/// Outbound port for todo persistence.
///
/// # Implementations
///
/// - [`crate::storage::SqliteTodoRepository`] - SQLite implementation
/// - Mocks are generated for unit tests with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Inserts the todo, or overwrites the stored row with the same id.
    async fn save(&self, todo: &Todo) -> Result<Todo, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, AppError>;

    /// Returns every todo in insertion order.
    async fn find_all(&self) -> Result<Vec<Todo>, AppError>;

    /// Removes the todo with `id`. Missing ids are ignored; callers that need
    /// a not-found signal must check [`TodoRepository::exists_by_id`] first.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError>;

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError>;

    /// Returns exactly the todos with `completed == true`, in no particular order.
    async fn find_completed_todos(&self) -> Result<Vec<Todo>, AppError>;

    /// Removes every given todo by identity as a single unit of work.
    async fn delete_all(&self, todos: &[Todo]) -> Result<(), AppError>;
}
