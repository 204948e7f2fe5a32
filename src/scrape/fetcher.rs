//! Retrying HTTP fetcher
//!
//! This module owns all raw HTTP traffic to the schedule API:
//! - Building the HTTP client with the locale-preference header
//! - One logical GET per call, retried a bounded number of times
//! - Uniform retry policy: every transport error, timeout, and non-2xx
//!   status is retryable, with a fixed delay between attempts

use crate::config::Config;
use crate::{AttemptError, FetchError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;

/// Builds the HTTP client used for every request in a run
///
/// The Accept-Language header is set once here; the API localizes column
/// headers on it, so it must ride along on every request.
///
/// # Arguments
///
/// * `config` - The harvest configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }

    Client::builder()
        .default_headers(headers)
        .timeout(config.request_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL's body as text, retrying transient failures
///
/// # Retry Policy
///
/// All failure classes are treated uniformly retryable: connection errors,
/// timeouts, non-2xx statuses, and body-read errors. Up to
/// `config.max_retries` attempts are made, with `config.retry_delay()`
/// between them. The final attempt's failure surfaces as
/// [`FetchError::Exhausted`] carrying the attempt count and last cause.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `config` - Retry budget and delay settings
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(FetchError)` - All attempts failed
pub async fn fetch_text(client: &Client, config: &Config, url: &str) -> Result<String, FetchError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match fetch_once(client, url).await {
            Ok(body) => return Ok(body),
            Err(e) => {
                if attempt >= config.max_retries {
                    return Err(FetchError::Exhausted {
                        url: url.to_string(),
                        attempts: attempt,
                        source: e,
                    });
                }
                tracing::debug!(
                    "Retrying {} (attempt {}/{}): {}",
                    url,
                    attempt,
                    config.max_retries,
                    e
                );
                tokio::time::sleep(config.retry_delay()).await;
            }
        }
    }
}

/// A single GET attempt: status check plus full body read
async fn fetch_once(client: &Client, url: &str) -> Result<String, AttemptError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AttemptError::Status(status));
    }

    Ok(response.text().await?)
}
