//! Process settings read from the environment (after `dotenvy::dotenv()`).

use crate::error::ConfigError;
use std::path::PathBuf;

const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Which store backs the proxy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::Load(format!(
                "invalid PROXY_STORE: {} (expected postgres or memory)",
                s
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerSettings {
    pub database_url: String,
    /// Schema used to qualify every table. From `PROXY_SCHEMA`, default `public`.
    pub schema: String,
    pub store: StoreKind,
    pub bind: String,
    pub config_path: PathBuf,
    pub body_limit: usize,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let schema = lookup("PROXY_SCHEMA").unwrap_or_else(|| "public".into());
        crate::config::check_identifier("schema", &schema)?;
        let store = match lookup("PROXY_STORE") {
            Some(s) => s.parse()?,
            None => StoreKind::Postgres,
        };
        let body_limit = match lookup("PROXY_BODY_LIMIT") {
            Some(s) => s
                .parse()
                .map_err(|_| ConfigError::Load(format!("invalid PROXY_BODY_LIMIT: {}", s)))?,
            None => DEFAULT_BODY_LIMIT,
        };
        Ok(ServerSettings {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "postgres://localhost/proxy".into()),
            schema,
            store,
            bind: lookup("PROXY_BIND").unwrap_or_else(|| "0.0.0.0:3000".into()),
            config_path: lookup("PROXY_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("config/proxy.json")),
            body_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<ServerSettings, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.schema, "public");
        assert_eq!(s.store, StoreKind::Postgres);
        assert_eq!(s.bind, "0.0.0.0:3000");
        assert_eq!(s.body_limit, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[("PROXY_STORE", "memory"), ("PROXY_SCHEMA", "blog"), ("PROXY_BODY_LIMIT", "2048")]).unwrap();
        assert_eq!(s.store, StoreKind::Memory);
        assert_eq!(s.schema, "blog");
        assert_eq!(s.body_limit, 2048);
    }

    #[test]
    fn rejects_bad_schema_and_store() {
        assert!(settings(&[("PROXY_SCHEMA", "blog\"; --")]).is_err());
        assert!(settings(&[("PROXY_STORE", "redis")]).is_err());
    }
}
