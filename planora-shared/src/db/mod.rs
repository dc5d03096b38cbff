/// Database utilities for the PostgreSQL backend
///
/// - `pool`: connection pool construction and health checks
/// - `migrations`: sqlx migration runner

pub mod migrations;
pub mod pool;
