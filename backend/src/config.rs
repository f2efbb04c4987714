//! Service configuration read from the environment.
//!
//! | Variable           | Default         |
//! |--------------------|-----------------|
//! | `FORMS_HOST`       | `127.0.0.1`     |
//! | `FORMS_PORT`       | `8080`          |
//! | `FORMS_DB_PATH`    | `forms.sqlite`  |
//! | `FORMS_JSON_LIMIT` | `10485760` (10 MB) |
//! | `FORMS_ACTOR_ID`   | `1`             |
//!
//! A value that does not parse is reported and replaced by its default.

use common::mapper::DEFAULT_ACTOR_ID;
use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Largest accepted JSON body, in bytes.
    pub json_limit: usize,
    /// User id written into the audit columns of stored forms.
    pub actor_id: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: PathBuf::from("forms.sqlite"),
            json_limit: 10 * 1024 * 1024,
            actor_id: DEFAULT_ACTOR_ID,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        Self {
            host: lookup("FORMS_HOST").unwrap_or(defaults.host),
            port: parse_or("FORMS_PORT", lookup("FORMS_PORT"), defaults.port),
            db_path: lookup("FORMS_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            json_limit: parse_or("FORMS_JSON_LIMIT", lookup("FORMS_JSON_LIMIT"), defaults.json_limit),
            actor_id: parse_or("FORMS_ACTOR_ID", lookup("FORMS_ACTOR_ID"), defaults.actor_id),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}
