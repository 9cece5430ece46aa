//! # PostgreSQL storage
//!
//! Maps the relational schema under `migrations/` onto the repository ports.
//! Queries are plain `sqlx::query` with runtime binding so the crate builds
//! without a live database.

use std::time::Duration;

use domains::ids::{self, IdGenerator};
use domains::{DomainError, Resource, Result};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::info;

mod comments;
mod likes;
mod replies;
mod threads;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens a connection pool.
pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await
        .map_err(DomainError::storage)?;
    info!(max_connections, "postgres pool ready");
    Ok(pool)
}

/// Applies pending migrations.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    MIGRATOR.run(pool).await.map_err(DomainError::storage)?;
    info!("migrations applied");
    Ok(())
}

/// All four repositories over one pool.
#[derive(Clone)]
pub struct PostgresForum {
    pool: PgPool,
    ids: IdGenerator,
}

impl PostgresForum {
    pub fn new(pool: PgPool, ids: IdGenerator) -> Self {
        Self { pool, ids }
    }

    pub fn with_random_ids(pool: PgPool) -> Self {
        Self::new(pool, ids::random_ids())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn next_id(&self, prefix: &str) -> String {
        ids::new_id(prefix, &self.ids)
    }

    /// Inserts an account row. Registration proper lives outside this service;
    /// this exists for seeding and tests.
    pub async fn add_user(
        &self,
        id: &str,
        username: &str,
        password_hash: &str,
        fullname: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, username, password, fullname) VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .bind(fullname)
        .execute(&self.pool)
        .await
        .map_err(DomainError::storage)?;
        Ok(())
    }

    /// `SELECT owner FROM <table> WHERE id = $1`, then compares.
    async fn verify_owner(
        &self,
        table: &'static str,
        resource: Resource,
        id: &str,
        owner: &str,
    ) -> Result<()> {
        let sql = format!("SELECT owner FROM {table} WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found(resource, id))?;

        let stored: String = row.try_get("owner").map_err(DomainError::storage)?;
        if stored == owner {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!("{owner} does not own {id}")))
        }
    }
}
