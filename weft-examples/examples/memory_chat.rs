//! Example: chat with per-conversation memory.
//!
//! Two conversations share one store; each turn sees only its own conversation's history.
//! Resuming conversation-001 after conversation-002 shows the history survived.
//!
//! Run: `cargo run -p weft-examples --example memory_chat`

use std::sync::Arc;

use weft::llm::LlmResponse;
use weft::{
    build_chat_graph, ChatNode, ConversationRunner, ConversationStore, InMemoryConversationStore,
    Message, MessagesState, MockLlm,
};

const TURNS: [(&str, &str, &str); 6] = [
    (
        "conversation-001",
        "Hi! My name is Alice and I love astronomy.",
        "Nice to meet you, Alice! Astronomy is a wonderful passion.",
    ),
    (
        "conversation-001",
        "What's my name and what do I love?",
        "Your name is Alice and you love astronomy.",
    ),
    (
        "conversation-001",
        "Can you recommend a book related to my interest?",
        "Try \"Cosmos\" by Carl Sagan.",
    ),
    (
        "conversation-002",
        "Hi! I'm Bob and I'm learning to cook.",
        "Hi Bob! Cooking is a great skill to learn.",
    ),
    ("conversation-002", "What's my name?", "Your name is Bob."),
    (
        "conversation-001",
        "Actually, what was the first thing I told you?",
        "You told me your name is Alice and that you love astronomy.",
    ),
];

fn print_conversation(id: &str, history: &[Message]) {
    println!("\n{}\nCONVERSATION HISTORY: {}\n{}", "=".repeat(60), id, "=".repeat(60));
    for message in history {
        match message {
            Message::User { content } => println!("\nUser: {}", content),
            Message::Assistant { content, .. } => println!("\nAssistant: {}", content),
            _ => {}
        }
    }
    println!("\n{}", "=".repeat(60));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = weft_examples::init()?.with_default_temperature(0.7);
    let offline = MockLlm::scripted(
        TURNS
            .iter()
            .map(|(_, _, reply)| Ok(LlmResponse::text(*reply)))
            .collect(),
    );
    let llm = weft_examples::model_or(offline);
    let node = ChatNode::new(llm, settings.generation_options())
        .with_system_prompt("You are a friendly assistant. Keep answers short.");
    let store = Arc::new(InMemoryConversationStore::<Message>::new());
    let runner: ConversationRunner<MessagesState> =
        ConversationRunner::new(build_chat_graph(node)?, store);

    for (id, input, _) in TURNS {
        let state = runner
            .send(id, vec![Message::user(input)], Some(settings.run_config()))
            .await?;
        println!("\n[{}]\nUser: {}", id, input);
        println!("Assistant: {}", state.last_assistant_reply().unwrap_or_default());
    }

    for id in runner.store().conversation_ids().await {
        print_conversation(&id, &runner.history(&id).await);
    }
    Ok(())
}
