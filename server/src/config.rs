use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub gateway_url: String,
    pub check_timeout_ms: u64,
    pub per_page: usize,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("SHOWCASE_PORT", "4000"),
            gateway_url: try_load("GATEWAY_URL", "http://localhost:3000/api"),
            check_timeout_ms: try_load("CHECK_TIMEOUT_MS", "5000"),
            per_page: try_load("PER_PAGE", "8"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
