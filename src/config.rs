use crate::source::DataApiConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DB_PATH: &str = "airbnb.sqlite3";
const DEFAULT_MAX_WORKERS: usize = 8;
const DEFAULT_COLLECTION: &str = "listingsAndReviews";

#[derive(Debug, Error, PartialEq)]
#[error("Invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub db_path: PathBuf,
    pub collection: String,
    pub seed_file: Option<PathBuf>,
    /// Set when both the URL and key are configured; takes precedence over the embedded store.
    pub data_api: Option<DataApiConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let collection = get("AIRBNB_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.into());

        let data_api = match (get("AIRBNB_DATA_API_URL"), get("AIRBNB_DATA_API_KEY")) {
            (Some(base_url), Some(api_key)) => Some(DataApiConfig {
                base_url,
                api_key,
                data_source: get("AIRBNB_DATA_SOURCE").unwrap_or_else(|| "Cluster0".into()),
                database: get("AIRBNB_DATABASE").unwrap_or_else(|| "sample_airbnb".into()),
                collection: collection.clone(),
                max_attempts: parse_or("AIRBNB_FETCH_ATTEMPTS", get("AIRBNB_FETCH_ATTEMPTS"), 1)?,
                timeout: Duration::from_secs(parse_or(
                    "AIRBNB_FETCH_TIMEOUT_SECS",
                    get("AIRBNB_FETCH_TIMEOUT_SECS"),
                    60,
                )?),
            }),
            _ => None,
        };

        let bind_raw = get("AIRBNB_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.trim().parse().map_err(|_| ConfigError {
            key: "AIRBNB_BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        Ok(Self {
            bind_addr,
            max_workers: parse_or(
                "AIRBNB_MAX_WORKERS",
                get("AIRBNB_MAX_WORKERS"),
                DEFAULT_MAX_WORKERS,
            )?,
            db_path: get("AIRBNB_DB_PATH")
                .unwrap_or_else(|| DEFAULT_DB_PATH.into())
                .into(),
            collection,
            seed_file: get("AIRBNB_SEED_FILE").map(PathBuf::from),
            data_api,
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError { key, value }),
    }
}
