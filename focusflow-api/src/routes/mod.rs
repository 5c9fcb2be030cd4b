/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Liveness and health check endpoints
/// - `users`: Registration, login, and account management
/// - `tasks`: Owner-scoped task CRUD
pub mod health;
pub mod tasks;
pub mod users;
