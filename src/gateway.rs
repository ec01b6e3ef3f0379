//! Shared plumbing for the HTTP service clients.

use crate::config::Config;
use crate::error::Result;
use std::time::Duration;

/// Build the HTTP client used for both services.
///
/// No timeout is set unless one is configured; a hung request then keeps the
/// run in its current stage.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Join a service base URL and an endpoint path.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Build both service clients from the configuration, sharing one connection pool.
pub fn clients_from_config(
    config: &Config,
) -> Result<(
    crate::transcript::TranscriptClient,
    crate::translate::TranslationClient,
)> {
    let client = http_client(config.timeout())?;
    Ok((
        crate::transcript::TranscriptClient::with_client(client.clone(), &config.service_url),
        crate::translate::TranslationClient::with_client(client, &config.service_url),
    ))
}
