//! Webhook Dispatch
//!
//! Fan-out of the final payload to every configured target. One task per
//! target, all running concurrently against a shared proxy-aware client;
//! the dispatch completes only when every task has finished — a join, not a
//! race. A failure on one target is recorded in its `DeliveryResult` and
//! never affects any other target.
//!
//! Target URLs are secrets. Log output and error details identify targets
//! positionally ("webhook 2/3") and never carry the URL itself.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::embed::Payload;
use crate::error::{NotifyError, NotifyResult};
use crate::proxy::{build_http_client, ProxyConfig};

/// Delivery policy shared by all targets.
#[derive(Debug, Clone, Default)]
pub struct DispatcherConfig {
    /// Route all deliveries through this proxy when set.
    pub proxy: Option<ProxyConfig>,
    /// Per-request timeout. Unset means a delivery may block indefinitely.
    pub timeout: Option<Duration>,
    /// Cap on in-flight deliveries. Unset means all targets at once.
    pub max_concurrency: Option<usize>,
}

/// Outcome of one delivery attempt. Exactly one per target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResult {
    /// Zero-based position in the configured target list.
    pub target_index: usize,
    pub success: bool,
    pub http_status: Option<u16>,
    pub error_detail: Option<String>,
}

/// Deliver the payload to every target concurrently.
///
/// Fails fast with `NoTargets` on an empty list, before any client is
/// built. Otherwise always returns one result per target, in target order,
/// regardless of how many deliveries failed.
pub async fn dispatch(
    targets: &[String],
    payload: &Payload,
    config: &DispatcherConfig,
) -> NotifyResult<Vec<DeliveryResult>> {
    if targets.is_empty() {
        return Err(NotifyError::NoTargets);
    }

    let client = build_http_client(config.proxy.as_ref(), config.timeout);
    let total = targets.len();
    let semaphore = config
        .max_concurrency
        .map(|n| Arc::new(Semaphore::new(n.max(1))));

    let mut handles = Vec::with_capacity(total);
    for (index, target) in targets.iter().enumerate() {
        let client = client.clone();
        let target = target.clone();
        let payload = payload.clone();
        let semaphore = semaphore.clone();

        handles.push(tokio::spawn(async move {
            let _permit = match semaphore {
                Some(s) => s.acquire_owned().await.ok(),
                None => None,
            };
            deliver(&client, index, total, &target, &payload).await
        }));
    }

    let mut results = Vec::with_capacity(total);
    for (index, handle) in handles.into_iter().enumerate() {
        let result = handle.await.unwrap_or_else(|e| {
            tracing::error!("webhook {}/{} delivery task failed: {e}", index + 1, total);
            DeliveryResult {
                target_index: index,
                success: false,
                http_status: None,
                error_detail: Some(format!("delivery task failed: {e}")),
            }
        });
        results.push(result);
    }

    Ok(results)
}

/// POST the payload to a single target and record the outcome.
async fn deliver(
    client: &reqwest::Client,
    index: usize,
    total: usize,
    target: &str,
    payload: &Payload,
) -> DeliveryResult {
    tracing::debug!("Delivering to webhook {}/{}", index + 1, total);

    match client.post(target).json(payload).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            if response.status().is_success() {
                tracing::info!("webhook {}/{} delivered: HTTP {status}", index + 1, total);
                DeliveryResult {
                    target_index: index,
                    success: true,
                    http_status: Some(status),
                    error_detail: None,
                }
            } else {
                // Redirects land here too: they are never followed, and a
                // redirecting webhook endpoint counts as a failed delivery.
                let body = response.text().await.unwrap_or_default();
                tracing::error!(
                    "webhook {}/{} failed: HTTP {status}: {body}",
                    index + 1,
                    total
                );
                DeliveryResult {
                    target_index: index,
                    success: false,
                    http_status: Some(status),
                    error_detail: Some(format!("HTTP {status}: {body}")),
                }
            }
        }
        Err(e) => {
            // reqwest errors carry the request URL; strip it so neither the
            // log nor the recorded detail can leak the webhook.
            let e = e.without_url();
            tracing::error!("webhook {}/{} transport error: {e}", index + 1, total);
            DeliveryResult {
                target_index: index,
                success: false,
                http_status: None,
                error_detail: Some(e.to_string()),
            }
        }
    }
}
