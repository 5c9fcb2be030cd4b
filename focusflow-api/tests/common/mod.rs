/// Shared helpers for API integration tests
///
/// Builds the full router against a lazily-connected pool: no query is
/// issued until a handler actually touches storage, so everything that
/// resolves before the database (the auth wall, request validation,
/// routing) is testable without infrastructure.
use axum::Router;
use focusflow_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, JwtConfig},
};
use sqlx::postgres::PgPoolOptions;

/// JWT secret used by the test router
pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Builds an application router backed by a lazy (unconnected) pool
pub fn test_app() -> Router {
    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/focusflow_test".to_string(),
            max_connections: 2,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect_lazy(&config.database.url)
        .expect("Lazy pool creation should not touch the network");

    build_router(AppState::new(pool, config))
}
