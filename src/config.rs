use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_SESSION_FILE: &str = ".lms_session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: Url,
    pub session_file: PathBuf,
    pub http_timeout: Duration,
    pub cache_ttl: Duration,
}

impl Config {
    pub fn new_from_env() -> Result<Self, AppError> {
        let api_url = env::var("LMS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let session_file =
            env::var("LMS_SESSION_FILE").unwrap_or_else(|_| DEFAULT_SESSION_FILE.to_string());
        let http_timeout = secs_from_env("LMS_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let cache_ttl = secs_from_env("LMS_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;

        Ok(Self {
            api_url: parse_api_url(&api_url)?,
            session_file: PathBuf::from(session_file),
            http_timeout,
            cache_ttl,
        })
    }

    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, AppError> {
        self.api_url = parse_api_url(api_url)?;
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

pub fn parse_api_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::Config(format!("LMS_API_URL is invalid ({}): {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Config(format!(
            "LMS_API_URL must be http or https, got {}",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(AppError::Config(format!("LMS_API_URL cannot be a base: {}", raw)));
    }
    Ok(url)
}

fn secs_from_env(key: &str, default: u64) -> Result<Duration, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| AppError::Config(format!("{} must be a whole number of seconds", key))),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
