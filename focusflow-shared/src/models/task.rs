/// Task model and owner-scoped database operations
///
/// Tasks are the core records of FocusFlow: a title, an optional
/// description, a priority, an optional due date, and a completion flag.
/// Every task belongs to exactly one owner, assigned at creation and
/// immutable afterwards.
///
/// Ownership is enforced here, at the query layer: every read and write
/// statement filters on `owner_id`, so a task that exists under a different
/// owner is indistinguishable from one that does not exist at all.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     description TEXT,
///     priority task_priority NOT NULL DEFAULT 'low',
///     due_date TIMESTAMPTZ,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use focusflow_shared::models::task::{CreateTask, Priority, Task};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create_for_owner(
///     &pool,
///     owner_id,
///     CreateTask {
///         title: "Buy milk".to_string(),
///         description: None,
///         priority: Priority::Low,
///         due_date: None,
///         completed: false,
///     },
/// )
/// .await?;
///
/// // Newest first
/// let tasks = Task::list_for_owner(&pool, owner_id).await?;
/// assert_eq!(tasks.first().map(|t| t.id), Some(task.id));
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
pub enum Priority {
    /// Low priority (the default for new tasks)
    #[default]
    Low,

    /// Medium priority
    Medium,

    /// High priority
    High,
}

impl Priority {
    /// Gets priority as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// Canonical completion state, normalized at the system boundary
///
/// Clients historically sent the completion flag in three encodings:
/// booleans, 0/1 numbers, and "yes"/"no" strings. All of them collapse to
/// one canonical boolean the moment they enter the system; everything past
/// the request DTOs only ever sees `bool`.
///
/// `true`, `1`, and `"yes"` (any case) mean complete. `false`, `0`, and
/// any other string mean incomplete.
///
/// # Example
///
/// ```
/// use focusflow_shared::models::task::Completion;
///
/// let done: Completion = serde_json::from_str("\"Yes\"").unwrap();
/// assert!(done.as_bool());
///
/// let not_done: Completion = serde_json::from_str("0").unwrap();
/// assert!(!not_done.as_bool());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion(bool);

impl Completion {
    /// Returns the canonical boolean state
    pub fn as_bool(self) -> bool {
        self.0
    }
}

impl From<Completion> for bool {
    fn from(completion: Completion) -> bool {
        completion.0
    }
}

impl From<bool> for Completion {
    fn from(value: bool) -> Self {
        Completion(value)
    }
}

impl Serialize for Completion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

/// Accepted wire encodings of the completion flag
#[derive(Deserialize)]
#[serde(untagged)]
enum CompletionRepr {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl From<CompletionRepr> for Completion {
    fn from(repr: CompletionRepr) -> Self {
        let complete = match repr {
            CompletionRepr::Bool(b) => b,
            CompletionRepr::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
            CompletionRepr::Text(s) => s.eq_ignore_ascii_case("yes"),
        };
        Completion(complete)
    }
}

impl<'de> Deserialize<'de> for Completion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = CompletionRepr::deserialize(deserializer)
            .map_err(|_| serde::de::Error::custom("expected a boolean, 0/1, or \"yes\"/\"no\""))?;
        Ok(repr.into())
    }
}

/// Task model
///
/// Serialized in camelCase to match the API's JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owner of the task, set at creation, never reassigned
    pub owner_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Priority level
    pub priority: Priority,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Canonical completion state
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// The owner is NOT part of this input: it is taken from the authenticated
/// caller and passed separately, so a client-supplied owner field can never
/// influence where the task lands.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Priority (defaults to Low)
    pub priority: Priority,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Completion flag, already normalized
    pub completed: bool,
}

/// Input for partially updating a task
///
/// Only non-None fields are written; everything else keeps its stored
/// value. Concurrent updates resolve last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New priority
    pub priority: Option<Priority>,

    /// New due date
    pub due_date: Option<DateTime<Utc>>,

    /// New completion state, already normalized
    pub completed: Option<bool>,
}

impl UpdateTask {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }
}

impl Task {
    /// Creates a new task owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the owner row is gone (foreign key violation)
    /// or the database is unreachable.
    pub async fn create_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, title, description, priority, due_date, completed)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, title, description, priority, due_date, completed,
                      created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.priority)
        .bind(data.due_date)
        .bind(data.completed)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by `owner_id`, newest-created first
    pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, priority, due_date, completed,
                   created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by id, scoped to its owner
    ///
    /// Returns None both when the id does not exist and when it exists
    /// under a different owner — the two cases are indistinguishable to
    /// the caller.
    pub async fn find_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        task_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, title, description, priority, due_date, completed,
                   created_at, updated_at
            FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Partially updates a task, scoped to its owner
    ///
    /// Only the fields set in `data` are written. The statement is a single
    /// UPDATE, so the write is all-or-nothing; the same ownership filter as
    /// [`Task::find_for_owner`] applies.
    ///
    /// # Returns
    ///
    /// The updated task, or None when no row matched both id and owner
    pub async fn update_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        task_id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            // Nothing to write; an empty update degenerates to a lookup.
            return Self::find_for_owner(pool, owner_id, task_id).await;
        }

        // Build the SET clause from whichever fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 2;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }
        if data.completed.is_some() {
            bind_count += 1;
            query.push_str(&format!(", completed = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 AND owner_id = $2 \
             RETURNING id, owner_id, title, description, priority, due_date, completed, \
             created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(task_id).bind(owner_id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }
        if let Some(completed) = data.completed {
            q = q.bind(completed);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task, scoped to its owner
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false when no row matched both id and
    /// owner
    pub async fn delete_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        task_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(task_id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
