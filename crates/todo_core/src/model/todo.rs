use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// A single todo item.
///
/// Fields are private so that `updated_at` only moves through the mutators,
/// each of which guarantees `updated_at` strictly increases and never falls
/// behind `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: Uuid,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Todo {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a todo from previously stored fields.
    pub fn restore(
        id: Uuid,
        title: String,
        description: Option<String>,
        completed: bool,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            title,
            description,
            completed,
            created_at,
            updated_at: updated_at.max(created_at),
        }
    }

    pub fn mark_as_completed(&mut self) {
        self.completed = true;
        self.touch();
    }

    pub fn mark_as_incomplete(&mut self) {
        self.completed = false;
        self.touch();
    }

    pub fn update_details(&mut self, title: impl Into<String>, description: Option<String>) {
        self.title = title.into();
        self.description = description;
        self.touch();
    }

    pub fn toggle_completion(&mut self) {
        if self.completed {
            self.mark_as_incomplete();
        } else {
            self.mark_as_completed();
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    // Two mutations inside one clock tick still have to order.
    fn touch(&mut self) {
        let now = OffsetDateTime::now_utc();
        let floor = self.updated_at + Duration::microseconds(1);
        self.updated_at = now.max(floor);
    }
}
