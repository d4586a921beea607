//! Environment-sourced configuration, replacing the original's `viper`
//! defaults table with `std::env` plus `dotenvy`.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Everything the server needs to start, loaded once at boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub redis_url: String,
    pub shutdown_timeout: Duration,
    pub storage_timeout: Duration,
    pub flush_interval: Duration,
    pub db_conn_max_lifetime: Duration,
    pub db_max_open_conns: u32,
    pub db_max_idle_conns: u32,
    pub login_limit: i64,
    pub password_limit: i64,
    pub ip_limit: i64,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var} is not a valid {kind}: {value}")]
    InvalidValue { var: &'static str, kind: &'static str, value: String },
}

fn env_or(var: &'static str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

fn env_seconds(var: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Err(_) => Ok(Duration::from_secs(default_secs)),
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidValue { var, kind: "integer seconds", value: raw }),
    }
}

fn env_i64(var: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env::var(var) {
        Err(_) => Ok(default),
        Ok(raw) => {
            raw.parse::<i64>().map_err(|_| ConfigError::InvalidValue { var, kind: "integer", value: raw })
        }
    }
}

fn env_u32(var: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(var) {
        Err(_) => Ok(default),
        Ok(raw) => {
            raw.parse::<u32>().map_err(|_| ConfigError::InvalidValue { var, kind: "integer", value: raw })
        }
    }
}

impl Config {
    /// Load configuration from the process environment, falling back to
    /// the same defaults as the original's `viper.SetDefault` table.
    pub fn from_env() -> Result<Self, ConfigError> {
        let address = env_or("ADDRESS", "127.0.0.1");
        let port = env_or("PORT", "4000");

        let db_address = env_or("DB_ADDRESS", "127.0.0.1");
        let db_port = env_or("DB_PORT", "5432");
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => format!(
                "postgres://{}:{}@{}:{}/{}",
                env_or("DB_USER", "loginguard"),
                env_or("DB_PASSWORD", "loginguard"),
                db_address,
                db_port,
                env_or("DB_NAME", "loginguard"),
            ),
        };

        let redis_address = env_or("REDIS_ADDRESS", "127.0.0.1");
        let redis_port = env_or("REDIS_PORT", "6379");
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| format!("redis://{}:{}", redis_address, redis_port));

        Ok(Self {
            bind_addr: format!("{}:{}", address, port),
            database_url,
            redis_url,
            shutdown_timeout: env_seconds("SERVER_SHUTDOWN_TIMEOUT", 30)?,
            storage_timeout: env_seconds("DB_TIMEOUT", 5)?,
            flush_interval: env_seconds("LIMIT_TIMECHECK", 60)?,
            db_conn_max_lifetime: env_seconds("DB_CONN_MAX_LIFETIME", 180)?,
            db_max_open_conns: env_u32("DB_MAX_OPEN_CONNS", 20)?,
            db_max_idle_conns: env_u32("DB_MAX_IDLE_CONNS", 20)?,
            login_limit: env_i64("LIMITFACTOR_LOGIN", 10)?,
            password_limit: env_i64("LIMITFACTOR_PASSWORD", 100)?,
            ip_limit: env_i64("LIMITFACTOR_IP", 1000)?,
            log_level: env_or("LOG_LEVEL", "debug"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_table_when_nothing_is_set() {
        // SAFETY: test runs single-threaded within this module; no other
        // test in this crate touches these variables.
        for var in [
            "ADDRESS", "PORT", "DB_ADDRESS", "DB_PORT", "DATABASE_URL", "REDIS_ADDRESS",
            "REDIS_PORT", "REDIS_URL", "SERVER_SHUTDOWN_TIMEOUT", "DB_TIMEOUT", "LIMIT_TIMECHECK",
            "DB_CONN_MAX_LIFETIME", "DB_MAX_OPEN_CONNS", "DB_MAX_IDLE_CONNS", "LIMITFACTOR_LOGIN",
            "LIMITFACTOR_PASSWORD", "LIMITFACTOR_IP", "LOG_LEVEL",
        ] {
            unsafe { env::remove_var(var) };
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:4000");
        assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
        assert_eq!(config.flush_interval, Duration::from_secs(60));
        assert_eq!(config.db_conn_max_lifetime, Duration::from_secs(180));
        assert_eq!(config.db_max_open_conns, 20);
        assert_eq!(config.db_max_idle_conns, 20);
        assert_eq!(config.login_limit, 10);
        assert_eq!(config.password_limit, 100);
        assert_eq!(config.ip_limit, 1000);
    }
}
