#[cfg(test)]
mod tests {
    use crate::config::{self, AppConfig};
    use std::env;
    use std::fs;
    use tempfile::{NamedTempFile, TempDir};

    fn write_temp_config(content: &str) -> NamedTempFile {
        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        fs::write(temp_file.path(), content).unwrap();
        temp_file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite://data/items.db");
        assert!(config.database.url_file.is_none());
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_seconds, 1);
        assert!(!config.rate_limit.trust_proxy_headers);
        assert_eq!(config.logging.directory, "logs");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(config::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_temp_config(
            r#"
            [server]
            port = 3000

            [rate_limit]
            max_requests = 50
            "#,
        );

        let cfg = config::load_with(Some(file.path())).unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.rate_limit.max_requests, 50);
        // Untouched keys keep their defaults
        assert_eq!(cfg.rate_limit.window_seconds, 1);
    }

    #[test]
    fn test_env_overrides_file() {
        // Only this test touches logging.file_prefix, so parallel tests are unaffected.
        let file = write_temp_config("[logging]\nfile_prefix = \"from-file.log\"\n");

        let cfg = config::load_with(Some(file.path())).unwrap();
        assert_eq!(cfg.logging.file_prefix, "from-file.log");

        env::set_var("ITEMSTORE__LOGGING__FILE_PREFIX", "from-env.log");
        let result = config::load_with(Some(file.path()));
        env::remove_var("ITEMSTORE__LOGGING__FILE_PREFIX");

        assert_eq!(result.unwrap().logging.file_prefix, "from-env.log");
    }

    #[test]
    fn test_invalid_server_port() {
        let file = write_temp_config("[server]\nport = 0\n");

        let result = config::load_with(Some(file.path()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid server.port"));
    }

    #[test]
    fn test_invalid_rate_limit() {
        let mut cfg = AppConfig::default();
        cfg.rate_limit.max_requests = 0;
        assert!(config::validate(&cfg).is_err());

        // Ignored while disabled
        cfg.rate_limit.enabled = false;
        assert!(config::validate(&cfg).is_ok());
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let mut cfg = AppConfig::default();
        cfg.database.max_connections = 0;
        let err = config::validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("max_connections"));
    }

    #[test]
    fn test_url_file_takes_precedence() {
        let secret = NamedTempFile::new().unwrap();
        fs::write(secret.path(), "sqlite://secret/items.db\n").unwrap();

        let mut cfg = AppConfig::default();
        cfg.database.url_file = Some(secret.path().display().to_string());

        assert_eq!(cfg.database.resolve_url().unwrap(), "sqlite://secret/items.db");
    }

    #[test]
    fn test_url_file_missing_or_empty() {
        let mut cfg = AppConfig::default();
        cfg.database.url_file = Some("/nonexistent/itemstore/url".to_string());
        assert!(cfg.database.resolve_url().is_err());

        let empty = NamedTempFile::new().unwrap();
        cfg.database.url_file = Some(empty.path().display().to_string());
        assert!(cfg.database.resolve_url().is_err());
    }

    #[test]
    fn test_ensure_sqlite_parent_dir() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("a").join("b").join("items.db");

        config::ensure_sqlite_parent_dir(&format!("sqlite://{}?mode=rwc", db_path.display())).unwrap();
        assert!(db_path.parent().unwrap().is_dir());

        // Non-file URLs are left alone
        config::ensure_sqlite_parent_dir("sqlite::memory:").unwrap();
        config::ensure_sqlite_parent_dir("postgres://localhost/items").unwrap();
    }
}
