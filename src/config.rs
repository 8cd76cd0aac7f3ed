/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, HOST/PORT, timeout, seed など)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    // Name or IP literal; names are resolved when the listener binds.
    pub host: String,
    pub port: u16,
    pub app_env: AppEnv,

    pub database_url: String,
    pub database_max_connections: u32,

    pub request_timeout: Duration,
    pub request_body_limit: usize,

    // Nicknames inserted at startup (users are otherwise created out of band).
    pub seed_users: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST")
            .map(|h| h.trim().to_string())
            .unwrap_or_else(|_| "127.0.0.1".to_string());
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid("HOST"));
        }
        let port: u16 = parse_var("PORT", 8080)?;

        let app_env = AppEnv::from_env();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://demo_db.sqlite3".to_string());

        let database_max_connections: u32 = parse_var("DATABASE_MAX_CONNECTIONS", 5)?;
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"));
        }

        let request_timeout = Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECONDS", 10)?);
        // A form with a single short field; anything near this size is not a nickname change.
        let request_body_limit: usize = parse_var("REQUEST_BODY_LIMIT_BYTES", 16 * 1024)?;

        let seed_users = std::env::var("SEED_USERS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        Ok(Self {
            host,
            port,
            app_env,
            database_url,
            database_max_connections,
            request_timeout,
            request_body_limit,
            seed_users,
        })
    }
}

// Unset → default; set but unparsable → error (a typo should not silently fall back).
fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 8] = [
        "APP_ENV",
        "HOST",
        "PORT",
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "REQUEST_TIMEOUT_SECONDS",
        "REQUEST_BODY_LIMIT_BYTES",
        "SEED_USERS",
    ];

    fn with_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
        let mut all: Vec<(&str, Option<&str>)> = KEYS.iter().map(|k| (*k, None)).collect();
        for (k, v) in vars {
            if let Some(slot) = all.iter_mut().find(|(key, _)| key == k) {
                slot.1 = Some(*v);
            }
        }
        temp_env::with_vars(all, f)
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = with_env(&[], Config::from_env).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.database_url, "sqlite://demo_db.sqlite3");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.request_body_limit, 16 * 1024);
        assert!(config.seed_users.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let config = with_env(
            &[
                ("APP_ENV", "PROD"),
                ("HOST", "localhost"),
                ("PORT", "3000"),
                ("DATABASE_URL", "sqlite::memory:"),
                ("REQUEST_TIMEOUT_SECONDS", "30"),
                ("REQUEST_BODY_LIMIT_BYTES", "512"),
                ("SEED_USERS", " joe, ,ann ,"),
            ],
            Config::from_env,
        )
        .unwrap();

        assert!(config.app_env.is_production());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.request_body_limit, 512);
        assert_eq!(config.seed_users, vec!["joe", "ann"]);
    }

    #[test]
    fn rejects_unparsable_values() {
        let err = with_env(&[("PORT", "eighty")], Config::from_env).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PORT"));

        let err = with_env(&[("HOST", "not a host")], Config::from_env).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("HOST"));

        let err = with_env(&[("HOST", "  ")], Config::from_env).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("HOST"));

        let err = with_env(&[("DATABASE_MAX_CONNECTIONS", "0")], Config::from_env).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"));
    }
}
