use std::path::Path;

use serde::Deserialize;

const DEFAULTS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    /// Path to a secret file holding the connection URL. When set, its trimmed
    /// contents take precedence over `url`.
    pub url_file: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Returns the effective connection URL, reading `url_file` if configured.
    pub fn resolve_url(&self) -> anyhow::Result<String> {
        match &self.url_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("failed to read database.url_file {}: {}", path, e))?;
                let url = raw.trim();
                if url.is_empty() {
                    return Err(anyhow::anyhow!("database.url_file {} is empty", path));
                }
                Ok(url.to_string())
            }
            None => Ok(self.url.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub max_requests: usize,
    pub window_seconds: u64,
    pub cleanup_interval_seconds: u64,
    /// Key clients on `X-Forwarded-For` / `X-Real-IP` instead of the socket peer.
    /// Only enable behind a reverse proxy that overwrites these headers.
    #[serde(default)]
    pub trust_proxy_headers: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
            .and_then(|cfg| cfg.try_deserialize::<AppConfig>())
        {
            Ok(app_cfg) => app_cfg,
            Err(e) => {
                eprintln!("FATAL: Failed to load default config: {}", e);
                panic!("Failed to load default config: {}", e);
            }
        }
    }
}

/// Loads configuration: embedded defaults -> itemstore.toml -> $ITEMSTORE_CONFIG -> env.
pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let custom_path = std::env::var("ITEMSTORE_CONFIG").ok();
    load_with(custom_path.as_deref().map(Path::new))
}

/// Same layering as [`load`], with an explicit extra config file instead of
/// reading `ITEMSTORE_CONFIG`.
pub fn load_with(extra_file: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        // Optional local file: itemstore.toml (in CWD)
        .add_source(::config::File::with_name("itemstore").required(false));

    if let Some(path) = extra_file {
        builder = builder.add_source(::config::File::from(path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("ITEMSTORE").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    if cfg.database.url.trim().is_empty() && cfg.database.url_file.is_none() {
        return Err(anyhow::anyhow!("database.url must not be empty"));
    }
    if cfg.database.max_connections == 0 {
        return Err(anyhow::anyhow!("database.max_connections must be > 0"));
    }
    if cfg.database.acquire_timeout_seconds == 0 {
        return Err(anyhow::anyhow!("database.acquire_timeout_seconds must be > 0"));
    }

    if cfg.rate_limit.enabled {
        if cfg.rate_limit.max_requests == 0 {
            return Err(anyhow::anyhow!("rate_limit.max_requests must be > 0"));
        }
        if cfg.rate_limit.window_seconds == 0 {
            return Err(anyhow::anyhow!("rate_limit.window_seconds must be > 0"));
        }
    }
    if cfg.rate_limit.cleanup_interval_seconds == 0 {
        return Err(anyhow::anyhow!("rate_limit.cleanup_interval_seconds must be > 0"));
    }

    Ok(())
}

/// Creates the parent directory of a file-backed SQLite URL.
pub fn ensure_sqlite_parent_dir(url: &str) -> anyhow::Result<()> {
    let Some(path) = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:")) else {
        return Ok(());
    };
    // Drop query parameters such as ?mode=rwc
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
