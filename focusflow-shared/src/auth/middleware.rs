/// Request authentication for Axum
///
/// This module implements the bearer-token check that guards every
/// authenticated endpoint: extract the `Authorization: Bearer <token>`
/// header, validate the token, and resolve the encoded identity to a live
/// user row. A token whose subject no longer exists in the database is
/// rejected the same way as a bad token.
///
/// After successful authentication an [`AuthContext`] is added to the
/// request extensions for handlers to extract.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use focusflow_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
/// ```
use axum::http::{header, HeaderMap};
use sqlx::PgPool;
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};
use crate::models::user::User;

/// Authentication context added to request extensions
///
/// Present on every request that passed the bearer-token check. The user id
/// is the single piece of identity every owner-scoped query is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context for a verified user
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Authorization header missing
    #[error("Not authorized, token missing")]
    MissingCredentials,

    /// Authorization header present but not a Bearer token
    #[error("Expected Bearer token")]
    InvalidFormat,

    /// Token failed signature/expiry/issuer validation
    #[error("Token invalid or expired")]
    InvalidToken(#[source] JwtError),

    /// Token was valid but its subject no longer exists
    #[error("User not found")]
    UnknownUser,

    /// Storage failure while resolving the user
    #[error("Database error: {0}")]
    DatabaseError(#[source] sqlx::Error),
}

/// Extracts the bearer token from the request headers
///
/// # Errors
///
/// - `AuthError::MissingCredentials` if the Authorization header is absent
///   or not valid UTF-8
/// - `AuthError::InvalidFormat` if the header does not carry a Bearer token
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)
}

/// Authenticates a request against the user store
///
/// Validates the token from `headers` and resolves its subject to a live
/// user record. This is the full `verifyToken` check: signature, expiry,
/// issuer, and the existence of the user the token was issued for.
///
/// # Errors
///
/// Every failure mode maps to 401 at the API boundary except
/// `DatabaseError`, which is a 500.
///
/// # Example
///
/// ```no_run
/// use axum::http::HeaderMap;
/// use focusflow_shared::auth::middleware::authenticate;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, headers: HeaderMap) -> Result<(), Box<dyn std::error::Error>> {
/// let auth = authenticate(&pool, "jwt-secret", &headers).await?;
/// println!("Authenticated as {}", auth.user_id);
/// # Ok(())
/// # }
/// ```
pub async fn authenticate(
    pool: &PgPool,
    secret: &str,
    headers: &HeaderMap,
) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers)?;

    let claims = validate_token(token, secret).map_err(AuthError::InvalidToken)?;

    // The token outlives nothing: its subject must still resolve to a row.
    let user = User::find_by_id(pool, claims.sub)
        .await
        .map_err(AuthError::DatabaseError)?
        .ok_or(AuthError::UnknownUser)?;

    Ok(AuthContext::new(user.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_missing_header() {
        let headers = HeaderMap::new();
        let result = bearer_token(&headers);
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );

        let result = bearer_token(&headers);
        assert!(matches!(result, Err(AuthError::InvalidFormat)));
    }

    #[test]
    fn test_bearer_token_extracts_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        let token = bearer_token(&headers).expect("Should extract token");
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn test_auth_context_holds_user_id() {
        let user_id = Uuid::new_v4();
        let context = AuthContext::new(user_id);
        assert_eq!(context.user_id, user_id);
    }
}
