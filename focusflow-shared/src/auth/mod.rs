/// Authentication utilities
///
/// This module provides the authentication primitives for FocusFlow:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and validation
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Bearer-token request authentication
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing, 24-hour expiration
/// - **Constant-time Comparison**: Password verification uses constant-time
///   operations
///
/// # Example
///
/// ```
/// use focusflow_shared::auth::password::{hash_password, verify_password};
/// use focusflow_shared::auth::jwt::{create_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // JWT token generation
/// let token = create_token(&Claims::new(Uuid::new_v4()), "secret-key")?;
/// # Ok(())
/// # }
/// ```
pub mod jwt;
pub mod middleware;
pub mod password;
