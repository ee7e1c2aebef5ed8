//! ChatAnthropic over HTTP.
//!
//! The live tests load `ANTHROPIC_API_KEY` from the environment, a project `.env` or
//! `~/.config/weft/config.toml`. Run with:
//!
//! ```bash
//! cargo test -p weft --test anthropic_http -- --ignored
//! ```


use std::sync::Arc;

use weft::{
    build_tool_loop_graph, Calculator, ChatAnthropic, GenerationOptions, LlmClient, LlmError,
    Message, MessagesState, ToolRegistry,
};

fn live_client() -> ChatAnthropic {
    env_config::load_and_apply("weft", None).ok();
    ChatAnthropic::from_env().expect("ANTHROPIC_API_KEY must be set for anthropic_http tests")
}

/// **Scenario**: an unreachable endpoint is a transport error, not a panic or an API error.
#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let client = ChatAnthropic::new("sk-test").with_base_url("http://127.0.0.1:9");
    let err = client
        .invoke(&[Message::user("hi")], &GenerationOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Transport(_)), "{:?}", err);
}

/// **Scenario**: a plain question gets a text answer with no tool calls.
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires ANTHROPIC_API_KEY and network; run with: cargo test -p weft --test anthropic_http -- --ignored"]
async fn live_text_completion() {
    let response = live_client()
        .invoke(
            &[Message::user("Reply with the single word: pong")],
            &GenerationOptions::default().with_max_tokens(16),
        )
        .await
        .expect("invoke");
    assert!(response.tool_calls.is_empty());
    assert!(response.content.to_lowercase().contains("pong"), "{}", response.content);
}

/// **Scenario**: the tool loop drives the calculator through the real model.
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires ANTHROPIC_API_KEY and network; run with: cargo test -p weft --test anthropic_http -- --ignored"]
async fn live_tool_loop_uses_calculator() {
    let tools = ToolRegistry::new().with(Arc::new(Calculator));
    let graph = build_tool_loop_graph(
        Arc::new(live_client()),
        tools,
        GenerationOptions::default().with_max_tokens(256),
    )
    .expect("compile");

    let out = graph
        .invoke(MessagesState::from_user("Use the calculator: what is 142 * 57?"), None)
        .await
        .expect("invoke");

    assert!(out
        .messages
        .iter()
        .any(|m| matches!(m, Message::Tool { is_error: false, .. })));
    assert!(out.last_assistant_reply().unwrap_or_default().contains("8094"));
}
