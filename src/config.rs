//! Startup configuration, read once from the environment and passed down explicitly.

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PG_PORT: u16 = 5432;

#[derive(Clone)]
pub struct TriviaConfig {
    pub database: PgConnectOptions,
    pub bind_addr: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Insert `model::DEFAULT_CATEGORIES` when the categories table is empty.
    pub seed_categories: bool,
    /// Issue `CREATE DATABASE` at startup when the target database is missing.
    pub create_database: bool,
}

impl TriviaConfig {
    /// Read from process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `DATABASE_URL` wins over the `DB_*` parts when set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database = match var("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url).map_err(|e| ConfigError::Url {
                key: "DATABASE_URL",
                reason: e.to_string(),
            })?,
            None => options_from_parts(
                &var("DB_USER").unwrap_or_else(|| "postgres".into()),
                &lookup("DB_PASSWORD").unwrap_or_default(),
                &var("DB_HOST").unwrap_or_else(|| "localhost:5432".into()),
                &var("DB_NAME").unwrap_or_else(|| "trivia".into()),
            )?,
        };

        let max_connections = match var("MAX_CONNECTIONS") {
            Some(v) => match v.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "MAX_CONNECTIONS",
                        value: v,
                    })
                }
            },
            None => 5,
        };

        let acquire_timeout = match var("ACQUIRE_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: "ACQUIRE_TIMEOUT_SECS",
                value: v.clone(),
            })?),
            None => Duration::from_secs(30),
        };

        Ok(TriviaConfig {
            database,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:5000".into()),
            max_connections,
            acquire_timeout,
            seed_categories: parse_flag("SEED_CATEGORIES", var("SEED_CATEGORIES"), false)?,
            create_database: parse_flag("CREATE_DATABASE", var("CREATE_DATABASE"), true)?,
        })
    }

    /// `user@host:port/database`, for logs. The password is never part of it.
    pub fn database_target(&self) -> String {
        let db = &self.database;
        format!(
            "{}@{}:{}/{}",
            db.get_username(),
            db.get_host(),
            db.get_port(),
            db.get_database().unwrap_or_default()
        )
    }
}

impl fmt::Debug for TriviaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriviaConfig")
            .field("database", &self.database_target())
            .field("bind_addr", &self.bind_addr)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("seed_categories", &self.seed_categories)
            .field("create_database", &self.create_database)
            .finish()
    }
}

fn options_from_parts(
    user: &str,
    password: &str,
    host: &str,
    name: &str,
) -> Result<PgConnectOptions, ConfigError> {
    let (host, port) = match host.rsplit_once(':') {
        Some((h, p)) => (
            h,
            p.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "DB_HOST",
                value: host.to_string(),
            })?,
        ),
        None => (host, DEFAULT_PG_PORT),
    };
    let options = PgConnectOptions::new()
        .host(host)
        .port(port)
        .username(user)
        .database(name);
    Ok(if password.is_empty() {
        options
    } else {
        options.password(password)
    })
}

fn parse_flag(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(default);
    };
    match v.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: v }),
    }
}
