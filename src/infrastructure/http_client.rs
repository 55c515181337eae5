use tracing::warn;

/// Builds a reqwest client, falling back to a default client when the
/// builder is rejected. The fallback has no timeout, so it is logged.
pub fn build_or_default(builder: reqwest::ClientBuilder, client_name: &str) -> reqwest::Client {
    builder.build().unwrap_or_else(|e| {
        warn!(
            client = client_name,
            error = %e,
            "http client build failed, using defaults without timeout"
        );
        reqwest::Client::new()
    })
}
