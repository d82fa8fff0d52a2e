// Discord Status Notify - CI notification entry point

use std::env;
use std::process::ExitCode;

use discord_status_notify::{
    build_embed, build_payload, dispatch, fit_embed, DispatcherConfig, Inputs, ProxyConfig,
    RunContext, Status, WorkflowEvent,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Configuration errors propagate and fail the process; per-target delivery
/// failures are logged and do not — a notifier must not fail the pipeline
/// it reports on.
async fn run() -> anyhow::Result<()> {
    tracing::info!("Reading inputs...");
    let inputs = Inputs::from_env()?;
    let status = Status::resolve(&inputs.status)?;
    let ctx = RunContext::from_env()?;

    tracing::info!("Generating payload...");
    let event = WorkflowEvent::from_payload(&ctx.event_name, &ctx.payload);
    let embed = fit_embed(build_embed(&inputs, status, &event.summary(), &ctx));
    let payload = build_payload(&inputs, embed);
    // The payload carries no target URLs, so it is safe to log.
    tracing::debug!("payload: {}", serde_json::to_string(&payload)?);

    let proxy = resolve_proxy();
    match &proxy {
        Some(p) => tracing::info!("Routing deliveries through proxy {}:{}", p.host, p.port),
        None => tracing::debug!("No proxy configured"),
    }

    let config = DispatcherConfig {
        proxy,
        timeout: inputs.timeout,
        max_concurrency: None,
    };

    let total = inputs.webhooks.len();
    tracing::info!(
        "Delivering to {total} webhook{}...",
        if total > 1 { "s" } else { "" }
    );
    let results = dispatch(&inputs.webhooks, &payload, &config).await?;

    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        tracing::warn!("{failed} of {total} deliveries failed");
    } else {
        tracing::info!("All {total} deliveries succeeded");
    }
    Ok(())
}

/// Resolve proxy configuration: explicit action inputs first, then the
/// conventional proxy environment variables.
fn resolve_proxy() -> Option<ProxyConfig> {
    let host = env::var("INPUT_PROXYHOST")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let port = env::var("INPUT_PROXYPORT")
        .ok()
        .and_then(|s| s.trim().parse::<u16>().ok());
    ProxyConfig::resolve(host.as_deref(), port, |key| env::var(key).ok())
}
