use reqwest::Url;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the backend proxy serving `/search`, `/event`, `/venue` and `/ipinfo`
    pub backend_url: Url,
    pub request_timeout: Duration,
    pub loki_url: Option<String>,
}
