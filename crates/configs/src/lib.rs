//! # configs
//!
//! Layered settings for the forum binaries. Later layers win:
//!
//! 1. built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. `config/local.toml` (optional, not committed)
//! 4. environment variables `FORUM__<SECTION>__<KEY>`, e.g. `FORUM__SERVER__PORT=8080`
//!
//! A `.env` file in the working directory is loaded into the process
//! environment first.

use std::path::Path;

use config::{Config, Environment, File, Map};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

pub use secrecy::ExposeSecret;

const ENV_PREFIX: &str = "FORUM";
const ENV_SEPARATOR: &str = "__";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub forum: ForumSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(deserialize_with = "secret")]
    pub url: SecretString,
    pub max_connections: u32,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Accounts registered in the memory store at start-up, written as
    /// `id:username` pairs separated by commas. Ignored by PostgreSQL.
    #[serde(deserialize_with = "user_list")]
    pub memory_users: Vec<MemoryUser>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryUser {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    #[serde(deserialize_with = "secret")]
    pub access_token_key: SecretString,
    pub access_token_age_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ForumSettings {
    pub max_title_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

fn secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

fn user_list<'de, D>(deserializer: D) -> Result<Vec<MemoryUser>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((id, username)) if !id.trim().is_empty() && !username.trim().is_empty() => {
                Ok(MemoryUser {
                    id: id.trim().to_owned(),
                    username: username.trim().to_owned(),
                })
            }
            _ => Err(serde::de::Error::custom(format!(
                "memory user `{entry}` is not `id:username`"
            ))),
        })
        .collect()
}

impl Settings {
    /// Loads `.env`, then every layer relative to the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), ".env loaded"),
            Err(e) if e.not_found() => {}
            Err(e) => debug!(error = %e, ".env ignored"),
        }
        Self::load_from(Path::new("config"), None)
    }

    /// Loads from `dir`. `env` replaces the process environment when given.
    pub fn load_from(
        dir: &Path,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "postgres://localhost/forum")?
            .set_default("database.max_connections", 10)?
            .set_default("database.run_migrations", true)?
            .set_default("storage.backend", "postgres")?
            .set_default("storage.memory_users", "")?
            .set_default("auth.access_token_key", "")?
            .set_default("auth.access_token_age_secs", 3000)?
            .set_default("forum.max_title_length", 50)?
            .set_default("log.level", "info")?
            .set_default("log.format", "json")?
            .add_source(File::from(dir.join("default.toml")).required(false))
            .add_source(File::from(dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.access_token_key.expose_secret().is_empty() {
            return Err(ConfigError::Invalid {
                key: "auth.access_token_key",
                reason: "must not be empty".into(),
            });
        }
        if self.forum.max_title_length == 0 {
            return Err(ConfigError::Invalid {
                key: "forum.max_title_length",
                reason: "must be positive".into(),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "database.max_connections",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn no_files() -> &'static Path {
        Path::new("does-not-exist")
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let settings =
            Settings::load_from(no_files(), env(&[("FORUM__AUTH__ACCESS_TOKEN_KEY", "s3cret")]))
                .unwrap();

        assert_eq!(settings.server.bind_addr(), "127.0.0.1:5000");
        assert_eq!(settings.storage.backend, StorageBackend::Postgres);
        assert!(settings.storage.memory_users.is_empty());
        assert_eq!(settings.forum.max_title_length, 50);
        assert_eq!(settings.auth.access_token_age_secs, 3000);
        assert_eq!(settings.log.format, LogFormat::Json);
        assert_eq!(settings.auth.access_token_key.expose_secret(), "s3cret");
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::load_from(
            no_files(),
            env(&[
                ("FORUM__AUTH__ACCESS_TOKEN_KEY", "s3cret"),
                ("FORUM__SERVER__PORT", "8080"),
                ("FORUM__STORAGE__BACKEND", "memory"),
                ("FORUM__DATABASE__RUN_MIGRATIONS", "false"),
                ("FORUM__LOG__FORMAT", "pretty"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.storage.backend, StorageBackend::Memory);
        assert!(!settings.database.run_migrations);
        assert_eq!(settings.log.format, LogFormat::Pretty);
    }

    #[test]
    fn missing_token_key_is_rejected() {
        let err = Settings::load_from(no_files(), env(&[])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "auth.access_token_key", .. }
        ));
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let settings =
            Settings::load_from(no_files(), env(&[("FORUM__AUTH__ACCESS_TOKEN_KEY", "s3cret")]))
                .unwrap();
        assert!(!format!("{settings:?}").contains("s3cret"));
    }

    #[test]
    fn unknown_backend_fails_to_load() {
        let err = Settings::load_from(
            no_files(),
            env(&[
                ("FORUM__AUTH__ACCESS_TOKEN_KEY", "s3cret"),
                ("FORUM__STORAGE__BACKEND", "sqlite"),
            ]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn memory_users_are_parsed_from_pairs() {
        let settings = Settings::load_from(
            no_files(),
            env(&[
                ("FORUM__AUTH__ACCESS_TOKEN_KEY", "s3cret"),
                ("FORUM__STORAGE__BACKEND", "memory"),
                ("FORUM__STORAGE__MEMORY_USERS", "user-123:dicoding, user-456:johndoe"),
            ]),
        )
        .unwrap();

        assert_eq!(
            settings.storage.memory_users,
            vec![
                MemoryUser {
                    id: "user-123".into(),
                    username: "dicoding".into(),
                },
                MemoryUser {
                    id: "user-456".into(),
                    username: "johndoe".into(),
                },
            ]
        );
    }

    #[test]
    fn memory_user_without_username_fails_to_load() {
        let err = Settings::load_from(
            no_files(),
            env(&[
                ("FORUM__AUTH__ACCESS_TOKEN_KEY", "s3cret"),
                ("FORUM__STORAGE__MEMORY_USERS", "user-123"),
            ]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
