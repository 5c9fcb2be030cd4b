/// Database utilities
///
/// - `pool`: PostgreSQL connection pool construction and health checks
/// - `migrations`: embedded schema migration runner
pub mod migrations;
pub mod pool;
