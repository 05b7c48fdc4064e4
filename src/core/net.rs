// src/core/net.rs

// Pooled HTTP client shared by the scraper and the sheets client.

use reqwest::Client;

use crate::config::options::TransportConfig;

/// Build one connection-pooled client from the transport settings.
/// Callers keep the client and reuse it every cycle.
pub fn build_client(cfg: &TransportConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(cfg.user_agent.as_str())
        .connect_timeout(cfg.connect_timeout)
        .tcp_keepalive(cfg.tcp_keepalive)
        .pool_max_idle_per_host(cfg.max_idle_conns)
        .pool_idle_timeout(cfg.idle_timeout)
        .build()
}
