/// Database models for FocusFlow
///
/// This module contains the persistent records and their queries.
///
/// # Models
///
/// - `user`: User accounts and credential management
/// - `task`: Per-user tasks with owner-scoped CRUD
///
/// # Example
///
/// ```no_run
/// use focusflow_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         name: "Alice".to_string(),
///         email: "alice@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub mod task;
pub mod user;
