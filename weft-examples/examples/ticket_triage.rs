//! Example: support-ticket triage.
//!
//! classify -> {billing | technical | general} -> format -> END, over five sample tickets.
//! Prints the workflow as Mermaid, then each formatted reply.
//!
//! Run: `cargo run -p weft-examples --example ticket_triage`
//! (set `ANTHROPIC_API_KEY` to use the real model; `RUST_LOG=weft=debug` for routing logs)

use weft::llm::LlmResponse;
use weft::{build_triage_graph, generate_mermaid, MockLlm, TicketState};

const TICKETS: [(&str, &str, &str); 5] = [
    (
        "TKT-001",
        "I was charged twice for my subscription this month. Can you please refund the duplicate charge?",
        "billing",
    ),
    (
        "TKT-002",
        "The app keeps crashing whenever I try to upload a file larger than 10MB. Error code: ERR_TIMEOUT",
        "technical",
    ),
    (
        "TKT-003",
        "What are your business hours? I'd like to schedule a demo of your premium features.",
        "general",
    ),
    (
        "TKT-004",
        "My credit card failed to process. I need to update my payment method urgently.",
        "billing",
    ),
    (
        "TKT-005",
        "Getting 500 Internal Server Error when trying to access the API. Here are the logs...",
        "technical",
    ),
];

/// One classification and one drafted reply per ticket, in order.
fn scripted_model() -> MockLlm {
    let script = TICKETS
        .iter()
        .flat_map(|(id, _, label)| {
            [
                Ok(LlmResponse::text(*label)),
                Ok(LlmResponse::text(format!(
                    "Thank you for contacting us about ticket {}. A {} specialist has reviewed \
                     your message and will follow up within one business day.",
                    id, label
                ))),
            ]
        })
        .collect();
    MockLlm::scripted(script)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = weft_examples::init()?;
    let llm = weft_examples::model_or(scripted_model());
    let graph = build_triage_graph(llm, settings.generation_options())?;

    println!("{}", generate_mermaid(&graph));

    for (id, content, expected) in TICKETS {
        println!("\n{}\nProcessing Ticket: {}\n{}", "=".repeat(60), id, "=".repeat(60));
        let state = graph
            .invoke(TicketState::new(id, content), Some(settings.run_config()))
            .await?;
        let category = state.category().map(|c| c.as_str()).unwrap_or("none");
        println!("classified as {} (expected {})", category, expected);
        if let Some(reply) = state.formatted() {
            println!("{}", reply);
        }
    }
    Ok(())
}
