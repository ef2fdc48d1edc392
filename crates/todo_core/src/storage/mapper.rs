use crate::model::Todo;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Row shape of the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TodoRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<&Todo> for TodoRow {
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

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo::restore(
            row.id,
            row.title,
            row.description,
            row.completed,
            row.created_at,
            row.updated_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::TodoRow;
    use crate::model::Todo;

    #[test]
    fn row_mapping_keeps_every_field() {
        let mut todo = Todo::new("Buy groceries", Some("Milk, eggs".to_string()));
        todo.mark_as_completed();

        let row = TodoRow::from(&todo);
        assert_eq!(row.id, todo.id());
        assert_eq!(row.title, "Buy groceries");
        assert_eq!(row.description.as_deref(), Some("Milk, eggs"));
        assert!(row.completed);
        assert_eq!(row.created_at, todo.created_at());
        assert_eq!(row.updated_at, todo.updated_at());

        let restored = Todo::from(row);
        assert_eq!(restored, todo);
    }
}
