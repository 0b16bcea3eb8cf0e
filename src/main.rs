use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use itemstore::{config, db, middleware, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (embedded defaults -> itemstore.toml -> env/.env)
    let app_cfg = config::load()?;

    // Logging (stdout + daily file rotation)
    let log_cfg = &app_cfg.logging;
    std::fs::create_dir_all(&log_cfg.directory).ok();
    let (stdout_nb, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let file_appender = tracing_appender::rolling::daily(&log_cfg.directory, &log_cfg.file_prefix);
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log_cfg.filter.clone().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stdout_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    // Keep the guards alive so the non-blocking writers flush on exit
    let _log_guards = (stdout_guard, file_guard);

    let pool = db::connect(&app_cfg.database).await?;
    db::init_db(&pool).await?;

    let state = AppState::new(pool.clone(), app_cfg.clone());

    if app_cfg.rate_limit.enabled {
        tokio::spawn(middleware::rate_limit::cleanup_task(
            state.rate_limiter.clone(),
            app_cfg.rate_limit.cleanup_interval_seconds,
        ));
    }

    let app = routes::build_router(state);

    let port: u16 = app_cfg.server.port;
    let host: String = app_cfg.server.host.clone();
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen addr {}:{} - {}", host, port, e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Itemstore listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Database pool closed");

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping server...");
}
