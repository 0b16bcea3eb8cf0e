#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::db;
    use crate::tests::support::test_pool;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_db_creates_items_table() {
        let pool = test_pool().await;

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
                .fetch_all(&pool)
                .await
                .unwrap();

        assert!(tables.contains(&"items".to_string()));
    }

    #[tokio::test]
    async fn test_init_db_is_idempotent() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO items (name) VALUES ('kept')").execute(&pool).await.unwrap();

        db::init_db(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items").fetch_one(&pool).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_name_is_not_null() {
        let pool = test_pool().await;
        let result = sqlx::query("INSERT INTO items (name, description) VALUES (NULL, 'x')")
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("items.db");

        let mut config = AppConfig::default();
        config.database.url = format!("sqlite://{}", path.display());
        config.database.max_connections = 2;

        let pool = db::connect(&config.database).await.unwrap();
        db::init_db(&pool).await.unwrap();
        pool.close().await;

        assert!(path.exists());
    }
}
