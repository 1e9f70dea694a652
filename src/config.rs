use anyhow::{Context, Result, anyhow, bail};
use std::env;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    Mysql,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub store_backend: StoreBackend,
    /// Required when `store_backend` is MySQL.
    pub database_url: Option<String>,
    pub api_prefix: String,

    // Rate limiting, 0 disables it
    pub rate_api_per_min: u32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = parse_or(&lookup, "STORE_BACKEND", StoreBackend::Mysql)?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        if store_backend == StoreBackend::Mysql && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND is mysql");
        }

        Ok(Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:5000".to_string()),
            store_backend,
            database_url,
            api_prefix: lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            rate_api_per_min: parse_or(&lookup, "RATE_API_PER_MIN", 1000)?,
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("invalid value '{raw}'"))
            .with_context(|| format!("{key} could not be parsed")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_for_memory_backend() {
        let config = Config::from_lookup(lookup_from(&[("STORE_BACKEND", "memory")])).unwrap();

        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.server_addr, "0.0.0.0:5000");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.rate_api_per_min, 1000);
        assert_eq!(config.log_dir, "logs");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn mysql_is_the_default_backend_and_needs_a_url() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let config = Config::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "mysql://hr:hr@localhost/hrms",
        )]))
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Mysql);
        assert_eq!(
            config.database_url.as_deref(),
            Some("mysql://hr:hr@localhost/hrms")
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "Memory"),
            ("SERVER_ADDR", "127.0.0.1:8080"),
            ("API_PREFIX", "/v1"),
            ("RATE_API_PER_MIN", " 0 "),
            ("LOG_DIR", "/var/log/hrms"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert_eq!(config.api_prefix, "/v1");
        assert_eq!(config.rate_api_per_min, 0);
        assert_eq!(config.log_dir, "/var/log/hrms");
    }

    #[test]
    fn bad_numbers_and_backends_are_errors() {
        let err = Config::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("RATE_API_PER_MIN", "lots"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("RATE_API_PER_MIN"));

        let err = Config::from_lookup(lookup_from(&[("STORE_BACKEND", "mongo")])).unwrap_err();
        assert!(err.to_string().contains("STORE_BACKEND"));
    }
}
