//! Payload Pipeline Integration Tests
//!
//! Drives the full inputs → context → event → embed → fit → payload chain
//! without the network, including the env-backed run context.

use serde_json::json;

use discord_status_notify::fit::{embed_text_len, MAX_FIELDS, TOTAL_LIMIT};
use discord_status_notify::{
    build_embed, build_payload, fit_embed, EmbedField, Inputs, RunContext, Status, WorkflowEvent,
};

fn push_context() -> RunContext {
    RunContext {
        owner: "octocat".to_string(),
        repo: "hello-world".to_string(),
        event_name: "push".to_string(),
        sha: "eventsha000".to_string(),
        ref_name: "refs/heads/main".to_string(),
        workflow: "CI".to_string(),
        actor: "octocat".to_string(),
        payload: json!({
            "commits": [
                {"id": "abcdef0123456", "message": "Ship it", "url": "https://github.com/octocat/hello-world/commit/abcdef0123456"}
            ]
        }),
    }
}

fn inputs_from(pairs: &[(&str, &str)]) -> Inputs {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Inputs::from_lookup(|key| map.get(key).cloned()).unwrap()
}

#[test]
fn test_full_pipeline_push_event() {
    let inputs = inputs_from(&[
        ("INPUT_WEBHOOK", "https://discord.test/a"),
        ("INPUT_STATUS", "failure"),
        ("INPUT_TITLE", "Build X"),
        ("INPUT_USERNAME", "CI Bot"),
    ]);
    let status = Status::resolve(&inputs.status).unwrap();
    let ctx = push_context();
    let event = WorkflowEvent::from_payload(&ctx.event_name, &ctx.payload);

    let embed = fit_embed(build_embed(&inputs, status, &event.summary(), &ctx));
    let payload = build_payload(&inputs, embed);
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["embeds"].as_array().unwrap().len(), 1);
    assert_eq!(json["embeds"][0]["title"], "Failure: Build X");
    assert_eq!(json["embeds"][0]["color"], 0xCB2431);
    assert_eq!(json["username"], "CI Bot");

    let fields = json["embeds"][0]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[0]["name"], "Repository");
    assert_eq!(fields[2]["name"], "Event - push");
    assert!(fields[2]["value"].as_str().unwrap().contains("`abcdef0`"));
    assert!(fields[4]["value"]
        .as_str()
        .unwrap()
        .contains("/commit/eventsha000/checks"));
}

#[test]
fn test_full_pipeline_pull_request_uses_head_sha() {
    let inputs = inputs_from(&[
        ("INPUT_WEBHOOK", "https://discord.test/a"),
        ("INPUT_STATUS", "success"),
    ]);
    let mut ctx = push_context();
    ctx.event_name = "pull_request".to_string();
    ctx.payload = json!({
        "pull_request": {
            "number": 7,
            "title": "Add notifier",
            "html_url": "https://github.com/octocat/hello-world/pull/7",
            "head": {"sha": "headsha111"}
        }
    });

    let status = Status::resolve(&inputs.status).unwrap();
    let event = WorkflowEvent::from_payload(&ctx.event_name, &ctx.payload);
    let embed = fit_embed(build_embed(&inputs, status, &event.summary(), &ctx));

    let workflow = &embed.fields[4];
    assert!(workflow.value.contains("/commit/headsha111/checks"));
    let event_field = &embed.fields[2];
    assert!(event_field.value.contains("[#7]"));
    assert!(event_field.value.contains("Add notifier"));
}

#[test]
fn test_pipeline_nodetail_produces_minimal_embed() {
    let inputs = inputs_from(&[
        ("INPUT_WEBHOOK", "https://discord.test/a"),
        ("INPUT_STATUS", "cancelled"),
        ("INPUT_TITLE", "Nightly"),
        ("INPUT_NODETAIL", "true"),
    ]);
    let status = Status::resolve(&inputs.status).unwrap();
    let ctx = push_context();
    let event = WorkflowEvent::from_payload(&ctx.event_name, &ctx.payload);

    let embed = fit_embed(build_embed(&inputs, status, &event.summary(), &ctx));
    assert_eq!(embed.title.as_deref(), Some("Nightly"));
    assert!(embed.fields.is_empty());

    let json = serde_json::to_value(&embed).unwrap();
    assert!(json.get("fields").is_none());
}

#[test]
fn test_pipeline_oversized_content_fits_under_every_limit() {
    let inputs = inputs_from(&[
        ("INPUT_WEBHOOK", "https://discord.test/a"),
        ("INPUT_STATUS", "failure"),
        ("INPUT_TITLE", &"t".repeat(1000)),
        ("INPUT_DESCRIPTION", &"d".repeat(10000)),
    ]);
    let status = Status::resolve(&inputs.status).unwrap();
    let ctx = push_context();

    let mut embed = build_embed(&inputs, status, &"e".repeat(5000), &ctx);
    // Pile on extra fields beyond what the builder emits.
    for i in 0..40 {
        embed
            .fields
            .push(EmbedField::new(format!("extra{i}"), "v".repeat(1500), true));
    }

    let fitted = fit_embed(embed);
    assert!(fitted.fields.len() <= MAX_FIELDS);
    assert!(embed_text_len(&fitted) <= TOTAL_LIMIT);
    // The verdict survives: title is only per-part truncated, never dropped.
    assert!(fitted.title.as_deref().unwrap().starts_with("Failure: t"));
    // Leading context fields outrank trailing extras.
    assert_eq!(fitted.fields[0].name, "Repository");
}

#[test]
fn test_run_context_from_env_with_event_file() {
    let event_file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        event_file.path(),
        r#"{"pull_request": {"head": {"sha": "headsha222"}}}"#,
    )
    .unwrap();

    // Env is process-global; this is the only test that touches it.
    std::env::set_var("GITHUB_REPOSITORY", "octocat/hello-world");
    std::env::set_var("GITHUB_EVENT_NAME", "pull_request");
    std::env::set_var("GITHUB_SHA", "mergesha333");
    std::env::set_var("GITHUB_REF", "refs/pull/7/merge");
    std::env::set_var("GITHUB_WORKFLOW", "CI");
    std::env::set_var("GITHUB_ACTOR", "octocat");
    std::env::set_var("GITHUB_EVENT_PATH", event_file.path());

    let ctx = RunContext::from_env().unwrap();
    assert_eq!(ctx.owner, "octocat");
    assert_eq!(ctx.repo, "hello-world");
    assert_eq!(ctx.checks_sha(), "headsha222");
}
