//! Embed Assembly
//!
//! Wire types for the Discord webhook payload plus the builder that
//! assembles an embed from inputs, resolved status, formatted event text,
//! and the run context. Pure data assembly: no truncation (see `fit`) and
//! no network (see `dispatch`).

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::context::RunContext;
use crate::inputs::Inputs;
use crate::status::Status;

/// One embed field. Order within `Embed::fields` is significant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }
}

/// Embed image attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedImage {
    pub url: String,
}

/// A rich message unit, subject to Discord's size limits (enforced by
/// `fit::fit_embed`, not here).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

/// The webhook request body. Carries exactly one embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payload {
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Assemble an embed from the resolved inputs and run context.
///
/// Rules applied in order: color override, timestamp, title selection then
/// status-label prefixing, optional image, optional description, and the
/// fixed ordered context field set unless suppressed.
pub fn build_embed(inputs: &Inputs, status: Status, event_text: &str, ctx: &RunContext) -> Embed {
    let opts = status.options();

    let mut title = inputs.title.clone();
    if !inputs.noprefix {
        // Prefixing happens after title selection, not before.
        title = Some(match title {
            Some(t) => format!("{}: {}", opts.label, t),
            None => opts.label.to_string(),
        });
    }

    let fields = if inputs.nocontext {
        Vec::new()
    } else {
        context_fields(ctx, event_text)
    };

    Embed {
        title,
        description: inputs.description.clone(),
        color: inputs.color.unwrap_or(opts.color),
        image: inputs.image.clone().map(|url| EmbedImage { url }),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        fields,
    }
}

/// Wrap a fitted embed into the webhook request body.
pub fn build_payload(inputs: &Inputs, embed: Embed) -> Payload {
    Payload {
        embeds: vec![embed],
        username: inputs.username.clone(),
        avatar_url: inputs.avatar_url.clone(),
    }
}

/// The fixed, ordered context field set. Earlier fields carry the primary
/// identity and survive fitting the longest.
fn context_fields(ctx: &RunContext, event_text: &str) -> Vec<EmbedField> {
    let repo_url = ctx.repo_url();
    let checks_url = format!("{}/commit/{}/checks", repo_url, ctx.checks_sha());

    vec![
        EmbedField::new(
            "Repository",
            format!("[{}/{}]({})", ctx.owner, ctx.repo, repo_url),
            true,
        ),
        EmbedField::new("Ref", ctx.ref_name.clone(), true),
        EmbedField::new(format!("Event - {}", ctx.event_name), event_text, false),
        EmbedField::new("Triggered by", ctx.actor.clone(), true),
        EmbedField::new(
            "Workflow",
            format!("[{}]({})", ctx.workflow, checks_url),
            true,
        ),
    ]
}
