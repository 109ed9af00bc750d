use crate::config::model::Config;
use reqwest::Url;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const BACKEND_URL_VAR: &str = "EVENTFINDER_BACKEND_URL";
pub const TIMEOUT_SECS_VAR: &str = "EVENTFINDER_TIMEOUT_SECS";
pub const LOKI_URL_VAR: &str = "LOKI_URL";

const DEFAULT_BACKEND_URL: &str = "http://localhost:5001";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid config '{name}'. Expected a URL, got '{value}'")]
    InvalidUrl { name: String, value: String },
    #[error("Invalid config '{name}'. Expected a positive integer, got '{value}'")]
    InvalidNumber { name: String, value: String },
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|name| env::var(name).ok())
}

pub fn load_config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let backend_url = load_url_config(&lookup, BACKEND_URL_VAR, DEFAULT_BACKEND_URL)?;
    let timeout_secs = load_u64_config(&lookup, TIMEOUT_SECS_VAR, DEFAULT_TIMEOUT_SECS)?;

    Ok(Config {
        backend_url,
        request_timeout: Duration::from_secs(timeout_secs),
        loki_url: lookup(LOKI_URL_VAR).filter(|url| !url.is_empty()),
    })
}

pub fn parse_url_config(name: &str, value: &str) -> Result<Url, ConfigError> {
    value
        .parse::<Url>()
        .ok()
        .filter(|url| !url.cannot_be_a_base())
        .ok_or_else(|| ConfigError::InvalidUrl {
            name: name.to_string(),
            value: value.to_string(),
        })
}

fn load_url_config(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
) -> Result<Url, ConfigError> {
    parse_url_config(name, &lookup(name).unwrap_or_else(|| default.to_string()))
}

fn load_u64_config(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .ok()
            .filter(|parsed| *parsed > 0)
            .ok_or(ConfigError::InvalidNumber {
                name: name.to_string(),
                value,
            }),
    }
}
