use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating a task.
/// All four fields are required; `status` is a free-form string.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// A description for the task.
    /// Must be between 1 and 1000 characters.
    #[validate(length(min = 1, max = 1000))]
    pub description: String,

    /// The date the task is due, as `YYYY-MM-DD`.
    pub due_date: NaiveDate,

    /// The current status of the task, e.g. "open" or "done".
    #[validate(length(min = 1))]
    pub status: String,
}

/// Body of a status-only update.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskStatusUpdate {
    pub status: String,
}

/// Body of a partial details update.
///
/// Absence means "leave unchanged": only the fields that are present are
/// written, the rest keep their prior values. At least one field must be
/// supplied; the handler rejects an all-empty patch.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskDetailsUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl TaskDetailsUpdate {
    /// True when no field was supplied, which makes the patch a no-op and
    /// therefore a validation error.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due_date.is_none()
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// A description for the task.
    pub description: String,
    /// The date the task is due.
    pub due_date: NaiveDate,
    /// The current status of the task.
    pub status: String,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Identifier of the user who owns the task. Set once at creation from
    /// the authenticated subject; never changes.
    pub user_id: i32,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` and the owner's `user_id`.
    /// Sets `created_at` to the current time and `id` to a new UUID. The
    /// owner always comes from the authenticated subject, never the client.
    pub fn new(input: TaskInput, user_id: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            status: input.status,
            created_at: Utc::now(),
            user_id,
        }
    }
}
