/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use focusflow_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use focusflow_shared::auth::middleware::{authenticate, AuthContext};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                       # Liveness probe (public)
/// ├── GET  /health                 # Health check (public)
/// └── /api/
///     ├── /user/
///     │   ├── POST /register       # Public
///     │   ├── POST /login          # Public
///     │   ├── GET  /me             # Bearer token
///     │   ├── PUT  /profile        # Bearer token
///     │   └── PUT  /password       # Bearer token
///     └── /tasks/                  # Bearer token
///         ├── GET    /
///         ├── POST   /
///         ├── GET    /:id
///         ├── PUT    /:id
///         └── DELETE /:id
/// ```
///
/// # Middleware Stack
///
/// 1. Request tracing (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer, permissive in dev)
/// 3. Bearer-token authentication on the protected route groups
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public probes
    let health_routes = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check));

    // Public user routes (no auth)
    let public_user_routes = Router::new()
        .route("/register", post(routes::users::register))
        .route("/login", post(routes::users::login));

    // Authenticated user routes
    let private_user_routes = Router::new()
        .route("/me", get(routes::users::me))
        .route("/profile", put(routes::users::update_profile))
        .route("/password", put(routes::users::update_password))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Authenticated task routes
    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/user", public_user_routes.merge(private_user_routes))
        .nest("/tasks", task_routes);

    // Permissive CORS in development, origin-listed in production
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer-token authentication middleware layer
///
/// Validates the token from the Authorization header, resolves it to a
/// live user, and injects [`AuthContext`] into request extensions. Every
/// failure mode surfaces as a uniform 401 (storage failures excepted).
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_context: AuthContext =
        authenticate(&state.db, state.jwt_secret(), req.headers()).await?;

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
