/// User endpoints
///
/// Registration, login, and account management:
///
/// - `POST /api/user/register` - Register new user
/// - `POST /api/user/login` - Login and get a token
/// - `GET  /api/user/me` - Current user's public profile (authenticated)
/// - `PUT  /api/user/profile` - Update name/email (authenticated)
/// - `PUT  /api/user/password` - Change password (authenticated)
///
/// Login failures are deliberately indistinguishable: an unknown email and
/// a wrong password produce the same status and message, so the endpoint
/// cannot be used to enumerate accounts.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use focusflow_shared::{
    auth::{jwt, middleware::AuthContext, password},
    models::user::{CreateUser, PublicUser, User},
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Uniform message for failed logins
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    /// Password (min 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

/// Update profile request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, message = "Valid name and email required"))]
    pub name: String,

    /// New email address
    #[validate(email(message = "Valid name and email required"))]
    pub email: String,
}

/// Change password request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    /// Current password, checked against the stored hash
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    /// Replacement password (min 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Token + public user response for register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Always true
    pub success: bool,

    /// Freshly issued bearer token (24h)
    pub token: String,

    /// Public user fields - never the password hash
    pub user: PublicUser,
}

/// Public profile of the authenticated user
#[derive(Debug, Serialize, Deserialize)]
pub struct Profile {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

/// Response for `GET /api/user/me`
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Always true
    pub success: bool,

    /// Name and email of the caller
    pub user: Profile,
}

/// Response for `PUT /api/user/profile`
#[derive(Debug, Serialize)]
pub struct UpdatedProfileResponse {
    /// Always true
    pub success: bool,

    /// Updated public user fields
    pub user: PublicUser,
}

/// Confirmation response with no payload
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Always true
    pub success: bool,

    /// Confirmation message
    pub message: String,
}

/// Maps validator output to a single-message 400
fn validation_error(errors: ValidationErrors) -> ApiError {
    let message = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errors)| errors.iter())
        .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid request".to_string());

    ApiError::Validation(message)
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/user/register
/// Content-Type: application/json
///
/// {
///   "name": "Alice",
///   "email": "alice@example.com",
///   "password": "password1"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: empty name, invalid email, password under 8 chars
/// - `409 Conflict`: email already registered
/// - `500 Internal Server Error`: storage failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate().map_err(validation_error)?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    let token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            user: user.public(),
        }),
    ))
}

/// Login with email and password
///
/// # Endpoint
///
/// ```text
/// POST /api/user/login
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "password": "password1"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing email or password
/// - `401 Unauthorized`: unknown email or wrong password, same message
///   for both
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(validation_error)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    tracing::info!(user_id = %user.id, "User logged in");

    let token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    Ok(Json(AuthResponse {
        success: true,
        token,
        user: user.public(),
    }))
}

/// Returns the authenticated user's name and email
///
/// # Endpoint
///
/// ```text
/// GET /api/user/me
/// Authorization: Bearer <token>
/// ```
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ProfileResponse>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        success: true,
        user: Profile {
            name: user.name,
            email: user.email,
        },
    }))
}

/// Replaces the authenticated user's name and email
///
/// # Endpoint
///
/// ```text
/// PUT /api/user/profile
/// Authorization: Bearer <token>
///
/// { "name": "Alice B", "email": "alice.b@example.com" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: empty name or invalid email
/// - `409 Conflict`: email already used by a different account
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UpdatedProfileResponse>> {
    req.validate().map_err(validation_error)?;

    // The caller keeping their current email is not a conflict
    if User::email_taken_by_other(&state.db, &req.email, auth.user_id).await? {
        return Err(ApiError::Conflict(
            "Email already used by another account".to_string(),
        ));
    }

    let user = User::update_profile(&state.db, auth.user_id, &req.name, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(Json(UpdatedProfileResponse {
        success: true,
        user: user.public(),
    }))
}

/// Changes the authenticated user's password
///
/// The current password must verify against the stored hash before the
/// replacement hash is written.
///
/// # Endpoint
///
/// ```text
/// PUT /api/user/password
/// Authorization: Bearer <token>
///
/// { "currentPassword": "password1", "newPassword": "password2" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: new password under 8 characters
/// - `401 Unauthorized`: current password does not match
pub async fn update_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdatePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    req.validate().map_err(validation_error)?;

    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let valid = password::verify_password(&req.current_password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Current password invalid".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.new_password)?;
    User::update_password(&state.db, auth.user_id, &password_hash).await?;

    tracing::info!(user_id = %user.id, "Password changed");

    Ok(Json(MessageResponse {
        success: true,
        message: "Password changed".to_string(),
    }))
}
