//! Workflow Run Context
//!
//! Read-only metadata about the CI run that triggered the notification,
//! resolved once from the `GITHUB_*` environment and the event payload file.

use std::env;
use std::fs;

use serde_json::Value;

use crate::error::{NotifyError, NotifyResult};

/// Metadata describing the CI execution being reported on.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    pub event_name: String,
    pub sha: String,
    pub ref_name: String,
    pub workflow: String,
    pub actor: String,
    /// Raw webhook event payload as delivered by the CI runner.
    pub payload: Value,
}

impl RunContext {
    /// Resolve the run context from the standard GitHub Actions environment.
    ///
    /// `GITHUB_REPOSITORY` must be present and of the form `owner/repo`; the
    /// event payload file is optional and degrades to an empty object when
    /// unset or unreadable, matching the runner toolkit's tolerance.
    pub fn from_env() -> NotifyResult<Self> {
        let repository = env::var("GITHUB_REPOSITORY")
            .map_err(|_| NotifyError::context("GITHUB_REPOSITORY not set"))?;
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
            .ok_or_else(|| {
                NotifyError::context(format!("malformed GITHUB_REPOSITORY: {repository}"))
            })?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            event_name: env::var("GITHUB_EVENT_NAME").unwrap_or_default(),
            sha: env::var("GITHUB_SHA").unwrap_or_default(),
            ref_name: env::var("GITHUB_REF").unwrap_or_default(),
            workflow: env::var("GITHUB_WORKFLOW").unwrap_or_default(),
            actor: env::var("GITHUB_ACTOR").unwrap_or_default(),
            payload: load_event_payload(),
        })
    }

    /// `https://github.com/{owner}/{repo}`
    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }

    /// The SHA whose checks page the user expects to land on.
    ///
    /// Pull-request triggers run against a synthetic merge commit whose SHA
    /// has no checks page; the head commit of the PR is the one that does.
    pub fn checks_sha(&self) -> &str {
        self.payload["pull_request"]["head"]["sha"]
            .as_str()
            .unwrap_or(&self.sha)
    }
}

/// Parse the event payload file named by `GITHUB_EVENT_PATH`.
///
/// Never fails: an unset path, unreadable file, or invalid JSON all degrade
/// to an empty object with a warning.
fn load_event_payload() -> Value {
    let Ok(path) = env::var("GITHUB_EVENT_PATH") else {
        return Value::Object(Default::default());
    };
    match fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Event payload is not valid JSON ({e}); continuing without it");
                Value::Object(Default::default())
            }
        },
        Err(e) => {
            tracing::warn!("Could not read event payload file ({e}); continuing without it");
            Value::Object(Default::default())
        }
    }
}
