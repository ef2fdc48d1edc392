use crate::error::AppError;
use crate::model::Todo;
use crate::port::TodoRepository;
use std::sync::Arc;
use uuid::Uuid;

/// Use cases over the todo repository.
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_todo(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Todo, AppError> {
        let todo = Todo::new(title, description.map(str::to_string));
        let saved = self.repository.save(&todo).await?;
        tracing::info!(todo_id = %saved.id(), "created todo");
        Ok(saved)
    }

    pub async fn get_all_todos(&self) -> Result<Vec<Todo>, AppError> {
        self.repository.find_all().await
    }

    pub async fn get_todo_by_id(&self, id: Uuid) -> Result<Todo, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(id))
    }

    pub async fn update_todo(
        &self,
        id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<Todo, AppError> {
        let mut todo = self.get_todo_by_id(id).await?;
        todo.update_details(title, description.map(str::to_string));
        let saved = self.repository.save(&todo).await?;
        tracing::info!(todo_id = %id, "updated todo");
        Ok(saved)
    }

    pub async fn toggle_todo_completion(&self, id: Uuid) -> Result<Todo, AppError> {
        let mut todo = self.get_todo_by_id(id).await?;
        todo.toggle_completion();
        let saved = self.repository.save(&todo).await?;
        tracing::info!(todo_id = %id, completed = saved.is_completed(), "toggled todo");
        Ok(saved)
    }

    pub async fn delete_todo(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.exists_by_id(id).await? {
            return Err(AppError::not_found(id));
        }
        self.repository.delete_by_id(id).await?;
        tracing::info!(todo_id = %id, "deleted todo");
        Ok(())
    }
}
