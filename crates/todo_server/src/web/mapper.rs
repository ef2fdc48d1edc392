use crate::web::dto::TodoDto;
use todo_core::model::Todo;

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id(),
            title: todo.title().to_string(),
            description: todo.description().map(str::to_string),
            completed: todo.is_completed(),
            created_at: todo.created_at(),
            updated_at: todo.updated_at(),
        }
    }
}

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self::from(&todo)
    }
}
