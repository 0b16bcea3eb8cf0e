use std::time::Duration;

use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use tracing::info;

use crate::config::{self, DatabaseConfig};

/// Maximum length of `items.name`, enforced by a CHECK constraint.
pub const ITEM_NAME_MAX_LEN: usize = 30;

/// Opens the connection pool described by `cfg`, creating the SQLite file if needed.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let db_url = cfg.resolve_url()?;
    config::ensure_sqlite_parent_dir(&db_url)?;
    if !Sqlite::database_exists(&db_url).await.unwrap_or(false) {
        info!("Creating SQLite database at {}", db_url);
        Sqlite::create_database(&db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_seconds))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                let _ = sqlx::query("PRAGMA busy_timeout=10000;").execute(&mut *conn).await;
                Ok(())
            })
        })
        .connect(&db_url)
        .await?;

    Ok(pool)
}

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }

    // SQLite ignores VARCHAR lengths, so the limit is a CHECK constraint.
    let create_items = format!(
        r#"CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR({max}) NOT NULL CHECK (length(name) <= {max}),
            description TEXT NULL
        )"#,
        max = ITEM_NAME_MAX_LEN
    );
    sqlx::query(&create_items).execute(pool).await?;

    Ok(())
}
