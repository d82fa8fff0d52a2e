//! Workflow Event Formatting
//!
//! Classifies the triggering CI event into a closed tagged union and renders
//! a concise markdown summary for the embed's event field. Classification is
//! total: payload shapes that do not match a known kind degrade to
//! `Unknown`, never to an error — new event kinds appear over time and must
//! not break notification delivery.

use serde_json::Value;

/// One commit from a push event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushCommit {
    pub id: String,
    pub message: String,
    pub url: Option<String>,
}

/// The triggering workflow event, reduced to what the summary needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    Push {
        commits: Vec<PushCommit>,
        compare_url: Option<String>,
    },
    PullRequest {
        number: u64,
        title: String,
        url: Option<String>,
    },
    WorkflowDispatch,
    Schedule {
        cron: Option<String>,
    },
    Release {
        tag: String,
        url: Option<String>,
    },
    Unknown {
        name: String,
    },
}

impl WorkflowEvent {
    /// Classify an event by name and raw payload.
    ///
    /// Missing or malformed payload fields fall back to `Unknown` rather
    /// than failing.
    pub fn from_payload(event_name: &str, payload: &Value) -> Self {
        match event_name {
            "push" => Self::Push {
                commits: parse_commits(payload),
                compare_url: payload["compare"].as_str().map(str::to_string),
            },
            "pull_request" | "pull_request_target" => {
                let pr = &payload["pull_request"];
                match pr["number"].as_u64() {
                    Some(number) => Self::PullRequest {
                        number,
                        title: pr["title"].as_str().unwrap_or_default().to_string(),
                        url: pr["html_url"].as_str().map(str::to_string),
                    },
                    None => Self::Unknown {
                        name: event_name.to_string(),
                    },
                }
            }
            "workflow_dispatch" => Self::WorkflowDispatch,
            "schedule" => Self::Schedule {
                cron: payload["schedule"].as_str().map(str::to_string),
            },
            "release" => {
                let release = &payload["release"];
                match release["tag_name"].as_str() {
                    Some(tag) => Self::Release {
                        tag: tag.to_string(),
                        url: release["html_url"].as_str().map(str::to_string),
                    },
                    None => Self::Unknown {
                        name: event_name.to_string(),
                    },
                }
            }
            name => Self::Unknown {
                name: name.to_string(),
            },
        }
    }

    /// Render a concise markdown summary of what triggered the run.
    pub fn summary(&self) -> String {
        match self {
            Self::Push {
                commits,
                compare_url,
            } => format_push(commits, compare_url.as_deref()),
            Self::PullRequest { number, title, url } => match url {
                Some(url) => format!("[#{number}]({url}) {title}"),
                None => format!("#{number} {title}"),
            },
            Self::WorkflowDispatch => "Workflow run was triggered manually".to_string(),
            Self::Schedule { cron } => match cron {
                Some(cron) => format!("Scheduled run (`{cron}`)"),
                None => "Scheduled run".to_string(),
            },
            Self::Release { tag, url } => match url {
                Some(url) => format!("Release [{tag}]({url})"),
                None => format!("Release {tag}"),
            },
            Self::Unknown { name } => format!("event: `{name}`"),
        }
    }
}

fn parse_commits(payload: &Value) -> Vec<PushCommit> {
    payload["commits"]
        .as_array()
        .map(|commits| {
            commits
                .iter()
                .filter_map(|c| {
                    Some(PushCommit {
                        id: c["id"].as_str()?.to_string(),
                        message: c["message"].as_str().unwrap_or_default().to_string(),
                        url: c["url"].as_str().map(str::to_string),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Commit count line, plus the head commit as a short-SHA link with the
/// first line of its message.
fn format_push(commits: &[PushCommit], compare_url: Option<&str>) -> String {
    if commits.is_empty() {
        return "No new commits".to_string();
    }

    let count = commits.len();
    let plural = if count == 1 { "" } else { "s" };
    let count_line = match compare_url {
        Some(url) => format!("[{count} new commit{plural}]({url})"),
        None => format!("{count} new commit{plural}"),
    };

    // Push payloads list commits oldest-first; the head commit is last.
    let head = &commits[count - 1];
    let short_sha: String = head.id.chars().take(7).collect();
    let subject = head.message.lines().next().unwrap_or_default();
    let head_line = match &head.url {
        Some(url) => format!("[`{short_sha}`]({url}) {subject}"),
        None => format!("`{short_sha}` {subject}"),
    };

    format!("{count_line}\n{head_line}")
}
