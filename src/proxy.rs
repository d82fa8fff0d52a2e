//! Proxy Configuration & HTTP Client Factory
//!
//! Explicit proxy configuration threaded through the dispatcher call —
//! never process-global environment mutation. The client factory builds
//! reqwest clients with webhook delivery policy baked in: redirects are
//! never followed (a redirecting endpoint could leak the payload to an
//! unintended host) and no timeout is applied unless one is supplied.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Resolved HTTP proxy endpoint shared by all deliveries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
}

impl ProxyConfig {
    /// Build the proxy URL string.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Resolve proxy configuration from explicit inputs or the conventional
    /// `http_proxy`/`https_proxy` environment variables.
    ///
    /// An explicit host+port pair wins; both must be present to count.
    pub fn resolve(
        explicit_host: Option<&str>,
        explicit_port: Option<u16>,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<Self> {
        if let (Some(host), Some(port)) = (explicit_host, explicit_port) {
            return Some(Self {
                host: host.to_string(),
                port,
            });
        }

        ["http_proxy", "HTTP_PROXY", "https_proxy", "HTTPS_PROXY"]
            .iter()
            .find_map(|key| env_lookup(key))
            .and_then(|raw| Self::parse(&raw))
    }

    /// Parse a proxy specifier: a full URL or a bare `host:port` pair.
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if raw.contains("://") {
            let parsed = url::Url::parse(raw).ok()?;
            let host = parsed.host_str()?.to_string();
            let port = parsed.port_or_known_default()?;
            return Some(Self { host, port });
        }

        let (host, port) = raw.rsplit_once(':')?;
        let port: u16 = port.parse().ok()?;
        if host.is_empty() {
            return None;
        }
        Some(Self {
            host: host.to_string(),
            port,
        })
    }
}

/// Build a `reqwest::Client` for webhook delivery.
///
/// - `Some(proxy)` -> route all requests through it
/// - `None` -> explicitly disable proxying (`no_proxy`), ignoring env vars
///
/// TLS verification stays on in both modes.
pub fn build_http_client(
    proxy: Option<&ProxyConfig>,
    timeout: Option<Duration>,
) -> reqwest::Client {
    let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
    match proxy {
        Some(cfg) => {
            let p = reqwest::Proxy::all(cfg.url()).expect("valid proxy URL");
            builder = builder.proxy(p);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().expect("failed to build reqwest client")
}
