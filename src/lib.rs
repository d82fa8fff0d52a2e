//! Discord Status Notify - Library
//!
//! Turns a CI run's status and context into a Discord embed and delivers it
//! to one or more webhook endpoints. The pipeline:
//! - resolve the status keyword to a label and color (`status`)
//! - classify and summarize the triggering event (`event`)
//! - assemble the embed and payload (`embed`)
//! - force the embed under Discord's size limits (`fit`)
//! - fan the payload out to every target concurrently (`dispatch`)
//!
//! `inputs`, `context`, and `proxy` are the thin setup collaborators that
//! resolve environment into the values the pipeline consumes.

pub mod context;
pub mod dispatch;
pub mod embed;
pub mod error;
pub mod event;
pub mod fit;
pub mod inputs;
pub mod proxy;
pub mod status;

pub use context::RunContext;
pub use dispatch::{dispatch, DeliveryResult, DispatcherConfig};
pub use embed::{build_embed, build_payload, Embed, EmbedField, Payload};
pub use error::{NotifyError, NotifyResult};
pub use event::WorkflowEvent;
pub use fit::fit_embed;
pub use inputs::Inputs;
pub use proxy::{build_http_client, ProxyConfig};
pub use status::{Status, StatusOption};
