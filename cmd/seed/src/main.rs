//! Creates demo accounts in PostgreSQL and prints an access token for each,
//! ready for `Authorization: Bearer <token>`.

use anyhow::Context;
use auth_adapters::password::hash_password;
use auth_adapters::JwtTokenManager;
use configs::{ExposeSecret, Settings};
use storage_adapters::postgres::{connect, migrate};
use storage_adapters::PostgresForum;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// (id, username, password, fullname)
const USERS: &[(&str, &str, &str, &str)] = &[
    ("user-123", "dicoding", "secret", "Dicoding Indonesia"),
    ("user-456", "johndoe", "secret", "John Doe"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::load().context("loading settings")?;
    let pool = connect(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await
    .context("connecting to postgres")?;
    migrate(&pool).await.context("running migrations")?;

    let forum = PostgresForum::with_random_ids(pool);
    let tokens = JwtTokenManager::new(
        settings.auth.access_token_key.expose_secret().as_bytes(),
        settings.auth.access_token_age_secs,
    );

    for (id, username, password, fullname) in USERS {
        let hash = hash_password(password)?;
        forum
            .add_user(id, username, &hash, fullname)
            .await
            .with_context(|| format!("inserting {username}"))?;
        let token = tokens.create_access_token(id, username)?;
        info!(user_id = id, username, "user seeded");
        println!("{username}\t{id}\t{token}");
    }

    Ok(())
}
