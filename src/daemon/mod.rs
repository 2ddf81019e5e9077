// Service bootstrap: config resolution, state wiring, HTTP server lifecycle.

pub mod runner;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::daemon::runner::JobRunner;
use crate::extractor::PdfExtractor;
use crate::fetcher::HttpFetcher;
use crate::models::ServiceConfig;
use crate::server::{self, AppState};
use crate::storage::{InMemoryResultStore, ResultStore};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

fn read_config_file(path: &Path) -> Result<ServiceConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: ServiceConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    tracing::info!("Loaded config from: {}", path.display());
    Ok(config)
}

/// Load the service config.
///
/// Search order:
/// 1. Explicit `config_path` (must exist)
/// 2. `$RGP_CONFIG_DIR/config.json`
/// 3. `<platform config dir>/resmi-gazete-processor/config.json`
/// 4. Built-in defaults
pub fn load_config(config_path: Option<&Path>) -> Result<ServiceConfig> {
    if let Some(path) = config_path {
        if path.exists() {
            return read_config_file(path);
        }
        return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
    }

    if let Ok(config_dir) = std::env::var("RGP_CONFIG_DIR") {
        let path = PathBuf::from(&config_dir).join("config.json");
        if path.exists() {
            return read_config_file(&path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("resmi-gazete-processor").join("config.json");
        if path.exists() {
            return read_config_file(&path);
        }
    }

    tracing::info!("No config file found, using defaults");
    Ok(ServiceConfig::default())
}

/// Apply `PORT` and `RGP_HOST` on top of a loaded config. `lookup` abstracts
/// the environment so callers and tests can supply their own.
///
/// A plain `HOST` is not read; shells often export it as the machine's
/// hostname.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.port = port
            .trim()
            .parse()
            .with_context(|| format!("Invalid PORT value '{}'", port))?;
    }
    if let Some(host) = lookup("RGP_HOST") {
        if !host.trim().is_empty() {
            config.host = host.trim().to_string();
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Service bootstrap
// ---------------------------------------------------------------------------

/// Wire the store, fetcher, extractor and runner for `config`.
pub fn build_state(config: &ServiceConfig) -> Result<Arc<AppState>> {
    let store = Arc::new(InMemoryResultStore::new()) as Arc<dyn ResultStore>;
    let fetcher = HttpFetcher::from_config(config).context("Failed to build HTTP client")?;
    let runner = Arc::new(JobRunner::new(
        Arc::clone(&store),
        Arc::new(fetcher),
        PdfExtractor::new(config.max_text_chars),
        config.max_concurrent_jobs,
    ));

    if config.max_concurrent_jobs == 0 {
        tracing::info!("Job concurrency is unbounded");
    } else {
        tracing::info!(
            "At most {} jobs will fetch/extract at once",
            config.max_concurrent_jobs
        );
    }

    Ok(Arc::new(AppState { store, runner }))
}

/// Run the HTTP service until Ctrl+C or SIGTERM.
///
/// Jobs still in flight at shutdown are dropped along with their results.
pub async fn start_service(config: ServiceConfig) -> Result<()> {
    let state = build_state(&config)?;
    let router = server::create_router(state);

    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    tracing::info!("Service started. Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Service exited cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate());
        match sigterm {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Received Ctrl+C signal");
                    }
                    _ = sigterm.recv() => {
                        tracing::info!("Received SIGTERM signal");
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Received Ctrl+C signal");
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Received Ctrl+C signal");
    }
}
