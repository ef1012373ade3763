//! HTTP server initialization and runtime setup.
//!
//! Picks the storage, rate limiter and safety backends from the configuration,
//! wires the services and runs Axum until a shutdown signal arrives.

use crate::application::services::{AuthService, LinkService};
use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::password::Argon2PasswordHasher;
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::infrastructure::rate_limit::{
    MemoryRateLimiter, RateLimiter, RedisRateLimiter, spawn_sweeper,
};
use crate::infrastructure::safety::{NullSafetyVerifier, SafetyVerifier, VirusTotalVerifier};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. `LOG_FORMAT=json`
/// switches to one JSON object per line.
pub fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL pool and migrations, or the in-memory store
/// - Redis or in-memory rate limiter (with its background sweeper)
/// - VirusTotal or null safety verifier
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;
    let rate_limiter = build_rate_limiter(&config).await;
    let safety = build_safety_verifier(&config)?;

    let link_service = Arc::new(LinkService::new(
        repository,
        safety,
        Arc::new(Argon2PasswordHasher::new()),
        config.link_settings(),
    ));
    let auth_service = Arc::new(AuthService::new(config.admin_token.as_deref()));
    if !auth_service.is_enabled() {
        tracing::warn!("ADMIN_TOKEN is not set, admin endpoints will reject every request");
    }

    let state = AppState::new(
        link_service,
        auth_service,
        rate_limiter,
        config.base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("No database configured, links are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryLinkRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
}

async fn build_rate_limiter(config: &Config) -> Arc<dyn RateLimiter> {
    let policy = config.rate_limit_policy();

    if let Some(redis_url) = &config.redis_url {
        match RedisRateLimiter::connect(redis_url, policy).await {
            Ok(limiter) => {
                tracing::info!("Rate limiter enabled (Redis)");
                return Arc::new(limiter);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory rate limiter.", e);
            }
        }
    }

    let limiter: Arc<dyn RateLimiter> = Arc::new(MemoryRateLimiter::new(policy));
    spawn_sweeper(
        limiter.clone(),
        Duration::from_secs(config.rate_limit_sweep_seconds),
    );
    tracing::info!("Rate limiter enabled (in-memory)");
    limiter
}

fn build_safety_verifier(config: &Config) -> Result<Arc<dyn SafetyVerifier>> {
    let Some(api_key) = &config.virustotal_api_key else {
        tracing::info!("Safety checks disabled");
        return Ok(Arc::new(NullSafetyVerifier::new()));
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(config.safety_timeout_ms))
        .build()
        .context("Failed to build HTTP client")?;

    tracing::info!("Safety checks enabled (VirusTotal)");
    Ok(Arc::new(VirusTotalVerifier::new(
        client,
        &config.virustotal_api_url,
        api_key,
    )))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
