//! # forum-api
//!
//! Loads settings, picks a storage backend, wires the use cases and serves
//! the HTTP API until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, AppState};
use auth_adapters::JwtTokenManager;
use axum::Router;
use configs::{ExposeSecret, LogFormat, Settings, StorageBackend};
use services::{ForumOptions, ForumServices, Repositories};
use storage_adapters::InMemoryForum;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings);

    let app = build_app(&settings).await?;

    let addr = settings.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, backend = ?settings.storage.backend, "forum api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("forum api stopped");
    Ok(())
}

/// Everything `main` serves, minus the listener.
async fn build_app(settings: &Settings) -> anyhow::Result<Router> {
    let repos = repositories(settings).await?;
    let services = ForumServices::new(
        repos,
        ForumOptions {
            max_title_length: settings.forum.max_title_length,
        },
    );
    let tokens = JwtTokenManager::new(
        settings.auth.access_token_key.expose_secret().as_bytes(),
        settings.auth.access_token_age_secs,
    );
    Ok(router(AppState::new(services, Arc::new(tokens))))
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match settings.log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

async fn repositories(settings: &Settings) -> anyhow::Result<Repositories> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            warn!("using the in-memory store; data is lost on shutdown");
            let store = Arc::new(InMemoryForum::default());
            for user in &settings.storage.memory_users {
                store.register_user(&user.id, &user.username).await;
                info!(user_id = %user.id, username = %user.username, "memory user registered");
            }
            if settings.storage.memory_users.is_empty() {
                warn!("storage.memory_users is empty; every write will be rejected");
            }
            Ok(Repositories {
                threads: store.clone(),
                comments: store.clone(),
                replies: store.clone(),
                likes: store,
            })
        }
        StorageBackend::Postgres => postgres_repositories(settings).await,
    }
}

#[cfg(feature = "db-postgres")]
async fn postgres_repositories(settings: &Settings) -> anyhow::Result<Repositories> {
    use storage_adapters::postgres::{connect, migrate};
    use storage_adapters::PostgresForum;

    let pool = connect(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await
    .context("connecting to postgres")?;

    if settings.database.run_migrations {
        migrate(&pool).await.context("running migrations")?;
    }

    let store = Arc::new(PostgresForum::with_random_ids(pool));
    Ok(Repositories {
        threads: store.clone(),
        comments: store.clone(),
        replies: store.clone(),
        likes: store,
    })
}

#[cfg(not(feature = "db-postgres"))]
async fn postgres_repositories(_settings: &Settings) -> anyhow::Result<Repositories> {
    anyhow::bail!("storage.backend = \"postgres\" but this build has no db-postgres feature")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl-c handler failed; shutting down");
    }
    info!("shutdown signal received");
}
