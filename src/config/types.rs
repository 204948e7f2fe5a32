use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Ders-Harvest
///
/// Every field has a default matching the upstream API's expectations, so a
/// config file is only needed to override something.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the schedule API
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Directory that holds dated output folders and the index files
    #[serde(rename = "output-root")]
    pub output_root: String,

    /// Maximum attempts per logical fetch
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Fixed delay between retry attempts (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Per-attempt wall-clock timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Global ceiling on in-flight HTTP requests
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: u32,

    /// Accept-Language header value; the API localizes responses on it
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: "https://obs.itu.edu.tr/public/DersProgram".to_string(),
            output_root: "public".to_string(),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 10,
            max_concurrent_requests: 10,
            accept_language: "en-US,en;q=0.9,tr-TR;q=0.8,tr;q=0.7".to_string(),
        }
    }
}

impl Config {
    /// Delay between retry attempts
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Per-attempt request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
