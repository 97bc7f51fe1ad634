use anyhow::Context;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::config::ScanConfig;

/// Build the client shared by every worker. Every request is bounded by `timeout_secs`.
pub fn create_client(config: &ScanConfig) -> anyhow::Result<Client> {
    ClientBuilder::new()
        // Connection pooling
        .pool_max_idle_per_host(config.threads)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_nodelay(true)

        // Timeouts
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))

        // TLS
        .use_rustls_tls()
        .https_only(false)

        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .user_agent(config.user_agent.as_str())

        // Targets are often staging hosts with self-signed certificates
        .danger_accept_invalid_certs(true)

        .build()
        .context("failed to build HTTP client")
}
