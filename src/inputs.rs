//! Action Inputs
//!
//! Resolves the notifier's inputs from the GitHub Actions `INPUT_*`
//! environment convention, validates them, and hands the core a clean
//! `Inputs` value. Webhook URLs are secrets: they are counted and indexed
//! in log output but never printed.

use std::env;
use std::time::Duration;

use crate::error::{NotifyError, NotifyResult};

/// Resolved notifier inputs.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    /// Webhook target URLs, one per line in the raw input.
    pub webhooks: Vec<String>,
    /// Raw status keyword; resolved via `Status::resolve` before use.
    pub status: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Explicit embed color override. Zero means "not set".
    pub color: Option<u32>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    /// Suppress the context field block.
    pub nocontext: bool,
    /// Suppress the status-label title prefix.
    pub noprefix: bool,
    /// Optional per-request timeout. Unset means deliveries may block.
    pub timeout: Option<Duration>,
}

impl Inputs {
    /// Read inputs from the process environment.
    pub fn from_env() -> NotifyResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read inputs through an arbitrary key lookup.
    ///
    /// The indirection keeps input parsing testable without mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> NotifyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = |name: &str| {
            lookup(&format!("INPUT_{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_webhook = input("WEBHOOK")
            .or_else(|| lookup("DISCORD_WEBHOOK").filter(|v| !v.trim().is_empty()))
            .unwrap_or_default();
        let webhooks: Vec<String> = raw_webhook
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if webhooks.is_empty() {
            return Err(NotifyError::NoTargets);
        }

        for (i, webhook) in webhooks.iter().enumerate() {
            // Discord's /github endpoint expects raw GitHub event JSON, not
            // an embed payload. Warn, do not auto-fix. Positional only: the
            // URL itself must never reach the log.
            if webhook.ends_with("/github") {
                tracing::warn!(
                    "webhook {}/{} has a `/github` suffix; embed delivery to it may fail",
                    i + 1,
                    webhooks.len()
                );
            }
        }

        // nodetail is the legacy switch that implies both suppressions.
        let nodetail = as_bool(input("NODETAIL"));
        let nocontext = nodetail || as_bool(input("NOCONTEXT"));
        let noprefix = nodetail || as_bool(input("NOPREFIX"));

        Ok(Self {
            webhooks,
            status: input("STATUS").unwrap_or_default().to_ascii_lowercase(),
            title: input("TITLE").or_else(|| input("JOB")),
            description: input("DESCRIPTION"),
            image: input("IMAGE"),
            color: input("COLOR")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|&c| c != 0),
            username: input("USERNAME"),
            avatar_url: input("AVATAR_URL"),
            nocontext,
            noprefix,
            timeout: input("HTTP_TIMEOUT_MS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|&ms| ms != 0)
                .map(Duration::from_millis),
        })
    }
}

fn as_bool(value: Option<String>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
