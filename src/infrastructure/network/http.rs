// HTTP client utilities
use crate::domain::error::AppError;
use crate::infrastructure::config::Config;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("langbridge/", env!("CARGO_PKG_VERSION"));

/// Create the shared HTTP client from configuration
pub fn create_client(config: &Config) -> Result<Client, AppError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(config.translate.timeout_secs))
        .user_agent(USER_AGENT);

    if let Some(proxy) = config.http_proxy.as_deref().filter(|p| !p.is_empty()) {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}
