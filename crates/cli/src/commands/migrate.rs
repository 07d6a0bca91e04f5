//! Session-store schema creation.
//!
//! Both binaries keep only tower-sessions state in `PostgreSQL`; the schema
//! comes from the session store itself, so "migration" here is calling its
//! setup routine against the right database.

use sqlx::PgPool;
use tower_sessions_sqlx_store::PostgresStore;

use super::CliError;

/// Create the session schema for the storefront database.
pub async fn storefront() -> Result<(), CliError> {
    migrate_database("STOREFRONT_DATABASE_URL").await
}

/// Create the session schema for the admin database.
pub async fn admin() -> Result<(), CliError> {
    migrate_database("ADMIN_DATABASE_URL").await
}

async fn migrate_database(env_var: &'static str) -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var(env_var).map_err(|_| CliError::MissingEnvVar(env_var))?;

    tracing::info!(%env_var, "Connecting");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating session schema");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Session schema ready");
    Ok(())
}
