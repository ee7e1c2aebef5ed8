//! Example: tool-using agent.
//!
//! decide -> (tools -> decide)* -> END with a calculator and a simulated web search.
//! Four questions: search only, calculator only, both, and one needing no tool.
//!
//! Run: `cargo run -p weft-examples --example tool_agent`

use std::sync::Arc;

use serde_json::json;
use weft::llm::LlmResponse;
use weft::tools::required_str;
use weft::{
    build_tool_loop_graph, Calculator, FnTool, Message, MessagesState, MockLlm, ToolCall,
    ToolRegistry, ToolSpec,
};

const QUESTIONS: [&str; 4] = [
    "Who created Claude AI?",
    "What is 142 * 57?",
    "Search for information about Claude AI and calculate 25 + 75",
    "What is the capital of France?",
];

fn web_search() -> FnTool {
    let spec = ToolSpec::new(
        "web_search",
        "Search the web for information about a query.",
        json!({
            "type": "object",
            "properties": {"query": {"type": "string", "description": "The search query string"}},
            "required": ["query"]
        }),
    );
    FnTool::new(spec, |args| {
        let query = required_str(&args, "query")?;
        Ok(format!(
            "Search results for '{}': [Simulated] Claude is an AI assistant created by Anthropic.",
            query
        ))
    })
}

/// Replays plausible tool use for the four questions, in order.
fn scripted_model() -> MockLlm {
    let search = |id: &str, q: &str| ToolCall::new(id, "web_search", json!({ "query": q }));
    let calc = |id: &str, e: &str| ToolCall::new(id, "calculator", json!({ "expression": e }));
    MockLlm::scripted(vec![
        Ok(LlmResponse::with_tool_calls("", vec![search("t1", "Claude AI creator")])),
        Ok(LlmResponse::text("Claude was created by Anthropic.")),
        Ok(LlmResponse::with_tool_calls("", vec![calc("t2", "142 * 57")])),
        Ok(LlmResponse::text("142 * 57 = 8094.")),
        Ok(LlmResponse::with_tool_calls(
            "Let me look that up and do the math.",
            vec![search("t3", "Claude AI"), calc("t4", "25 + 75")],
        )),
        Ok(LlmResponse::text(
            "Claude is an AI assistant made by Anthropic, and 25 + 75 = 100.",
        )),
        Ok(LlmResponse::text("The capital of France is Paris.")),
    ])
}

fn print_run(state: &MessagesState) {
    for message in state.messages.iter() {
        match message {
            Message::User { content } => println!("Human: {}\n", content),
            Message::Assistant { tool_calls, .. } if !tool_calls.is_empty() => {
                let names: Vec<&str> = tool_calls.iter().map(|c| c.name.as_str()).collect();
                println!("Agent: [Calling tools: {:?}]", names);
            }
            Message::Assistant { content, .. } => println!("Agent: {}\n", content),
            Message::Tool { content, .. } => println!("Tool Result: {}\n", content),
            Message::System { .. } => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = weft_examples::init()?.with_default_temperature(0.0);
    let llm = weft_examples::model_or(scripted_model());
    let tools = ToolRegistry::new()
        .with(Arc::new(web_search()))
        .with(Arc::new(Calculator));
    let graph = build_tool_loop_graph(llm, tools, settings.generation_options())?;

    for question in QUESTIONS {
        println!("\n{}\nQuestion: {}\n{}\n", "=".repeat(60), question, "=".repeat(60));
        let state = graph
            .invoke(MessagesState::from_user(question), Some(settings.run_config()))
            .await?;
        print_run(&state);
    }
    Ok(())
}
