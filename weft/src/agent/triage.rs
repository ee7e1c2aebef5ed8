//! Support-ticket triage: classify → {billing | technical | general} → format → END.
//!
//! The classifier's label is coerced into the closed [`Category`] set; anything it does
//! not recognise becomes [`Category::General`], so routing never sees an unmapped key.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::channels::{Channel, GraphState, LastValue};
use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, Node, StateGraph, END, START};
use crate::llm::{GenerationOptions, LlmClient};
use crate::message::Message;

pub const CLASSIFY_NODE: &str = "classify";
pub const FORMAT_NODE: &str = "format";

/// Token budget for the one-word classification reply.
pub const CLASSIFY_MAX_TOKENS: u32 = 50;
/// Token budget for a handler's drafted reply.
pub const HANDLER_MAX_TOKENS: u32 = 500;

/// Ticket category. Also the route key and the handler node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Billing,
    Technical,
    General,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Billing, Category::Technical, Category::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Billing => "billing",
            Self::Technical => "technical",
            Self::General => "general",
        }
    }

    /// Parses a model label (trimmed, case-insensitive). Unknown labels fall back to `General`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "billing" => Self::Billing,
            "technical" => Self::Technical,
            _ => Self::General,
        }
    }

    fn instructions(&self) -> (&'static str, &'static str) {
        match self {
            Self::Billing => (
                "You are a billing support specialist. A customer has submitted this billing inquiry:",
                "1. Acknowledges their concern\n\
                 2. Provides relevant information about billing processes\n\
                 3. Offers next steps or solutions\n\
                 4. Mentions escalation to the billing team if needed",
            ),
            Self::Technical => (
                "You are a technical support specialist. A customer has reported this technical issue:",
                "1. Acknowledges the technical issue\n\
                 2. Suggests troubleshooting steps or workarounds\n\
                 3. Asks for additional information if needed (error logs, screenshots, etc.)\n\
                 4. Sets expectations for resolution timeline",
            ),
            Self::General => (
                "You are a customer support representative. A customer has submitted this general inquiry:",
                "1. Acknowledges their message\n\
                 2. Answers their questions or provides relevant information\n\
                 3. Offers additional resources or assistance\n\
                 4. Thanks them for reaching out",
            ),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one ticket as it moves through triage. Every field overwrites.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketState {
    pub ticket_id: LastValue<String>,
    pub ticket_content: LastValue<String>,
    pub classification: LastValue<Category>,
    pub handler_response: LastValue<String>,
    pub formatted_response: LastValue<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketUpdate {
    pub classification: Option<Category>,
    pub handler_response: Option<String>,
    pub formatted_response: Option<String>,
}

impl TicketState {
    pub fn new(ticket_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            ticket_id: LastValue::with_value(ticket_id.into()),
            ticket_content: LastValue::with_value(content.into()),
            ..Default::default()
        }
    }

    pub fn ticket_id(&self) -> &str {
        self.ticket_id.get().map(String::as_str).unwrap_or_default()
    }

    pub fn content(&self) -> &str {
        self.ticket_content.get().map(String::as_str).unwrap_or_default()
    }

    pub fn category(&self) -> Option<Category> {
        self.classification.get().copied()
    }

    pub fn formatted(&self) -> Option<&str> {
        self.formatted_response.get().map(String::as_str)
    }
}

impl GraphState for TicketState {
    type Update = TicketUpdate;

    fn merge(&mut self, update: TicketUpdate) {
        self.classification.merge(update.classification);
        self.handler_response.merge(update.handler_response);
        self.formatted_response.merge(update.formatted_response);
    }
}

/// Route key after classification. An unclassified ticket routes as `general`.
pub fn route_ticket(state: &TicketState) -> String {
    let category = state.category().unwrap_or(Category::General);
    tracing::info!(ticket_id = state.ticket_id(), route = %category, "routing ticket");
    category.as_str().to_string()
}

fn classify_prompt(content: &str) -> String {
    format!(
        "Analyze this customer support ticket and classify it into one of these categories:\n\
         - billing: For payment, invoices, refunds, subscription issues\n\
         - technical: For bugs, errors, performance issues, technical problems\n\
         - general: For general questions, feedback, or other inquiries\n\n\
         Ticket content: {}\n\n\
         Respond with ONLY the category name (billing, technical, or general), nothing else.",
        content
    )
}

fn handler_prompt(category: Category, content: &str) -> String {
    let (role, points) = category.instructions();
    format!(
        "{}\n\n{}\n\nProvide a helpful, professional response that:\n{}\n\n\
         Keep the response concise (2-3 paragraphs).",
        role, content, points
    )
}

/// Renders the customer-facing reply.
pub fn format_response(ticket_id: &str, category: Category, body: &str) -> String {
    let rule = "━".repeat(52);
    format!(
        "\n{rule}\nCUSTOMER SUPPORT RESPONSE\n{rule}\n\n\
         Ticket ID: {id}\n\
         Category: {category}\n\n\
         Dear Valued Customer,\n\n\
         {body}\n\n\
         Best regards,\n\
         Customer Support Team\n\
         Support Ticket: {id}\n\n\
         {rule}\n",
        rule = rule,
        id = ticket_id,
        category = category.as_str().to_uppercase(),
        body = body,
    )
}

/// Asks the model for a category label.
pub struct ClassifyNode {
    llm: Arc<dyn LlmClient>,
    options: GenerationOptions,
}

impl ClassifyNode {
    pub fn new(llm: Arc<dyn LlmClient>, options: GenerationOptions) -> Self {
        Self {
            llm,
            options: options.with_max_tokens(CLASSIFY_MAX_TOKENS),
        }
    }
}

#[async_trait]
impl Node<TicketState> for ClassifyNode {
    fn id(&self) -> &str {
        CLASSIFY_NODE
    }

    async fn run(&self, state: &TicketState) -> Result<TicketUpdate, AgentError> {
        let prompt = Message::user(classify_prompt(state.content()));
        let response = self.llm.invoke(&[prompt], &self.options).await?;
        let category = Category::from_label(&response.content);
        if category.as_str() != response.content.trim().to_lowercase() {
            tracing::warn!(
                ticket_id = state.ticket_id(),
                label = %response.content,
                "unrecognised classification, falling back to general"
            );
        }
        tracing::info!(ticket_id = state.ticket_id(), %category, "ticket classified");
        Ok(TicketUpdate {
            classification: Some(category),
            ..Default::default()
        })
    }
}

/// Drafts a reply with category-specific instructions.
pub struct HandlerNode {
    category: Category,
    llm: Arc<dyn LlmClient>,
    options: GenerationOptions,
}

impl HandlerNode {
    pub fn new(category: Category, llm: Arc<dyn LlmClient>, options: GenerationOptions) -> Self {
        Self {
            category,
            llm,
            options: options.with_max_tokens(HANDLER_MAX_TOKENS),
        }
    }
}

#[async_trait]
impl Node<TicketState> for HandlerNode {
    fn id(&self) -> &str {
        self.category.as_str()
    }

    async fn run(&self, state: &TicketState) -> Result<TicketUpdate, AgentError> {
        let prompt = Message::user(handler_prompt(self.category, state.content()));
        let response = self.llm.invoke(&[prompt], &self.options).await?;
        tracing::info!(ticket_id = state.ticket_id(), handler = %self.category, "response drafted");
        Ok(TicketUpdate {
            handler_response: Some(response.content.trim().to_string()),
            ..Default::default()
        })
    }
}

/// Renders the final reply from the classification and the drafted response.
pub struct FormatNode;

#[async_trait]
impl Node<TicketState> for FormatNode {
    fn id(&self) -> &str {
        FORMAT_NODE
    }

    async fn run(&self, state: &TicketState) -> Result<TicketUpdate, AgentError> {
        let body = state.handler_response.get().ok_or_else(|| {
            AgentError::ExecutionFailed(format!(
                "ticket {} has no drafted response",
                state.ticket_id()
            ))
        })?;
        let category = state.category().unwrap_or(Category::General);
        Ok(TicketUpdate {
            formatted_response: Some(format_response(state.ticket_id(), category, body)),
            ..Default::default()
        })
    }
}

/// Compiled triage graph. `options` supplies model and temperature; token budgets are
/// fixed per step.
pub fn build_triage_graph(
    llm: Arc<dyn LlmClient>,
    options: GenerationOptions,
) -> Result<CompiledStateGraph<TicketState>, CompilationError> {
    let mut graph = StateGraph::new();
    graph.add_node(
        CLASSIFY_NODE,
        Arc::new(ClassifyNode::new(llm.clone(), options.clone())),
    );
    for category in Category::ALL {
        graph.add_node(
            category.as_str(),
            Arc::new(HandlerNode::new(category, llm.clone(), options.clone())),
        );
        graph.add_edge(category.as_str(), FORMAT_NODE);
    }
    graph.add_node(FORMAT_NODE, Arc::new(FormatNode));
    graph.add_edge(START, CLASSIFY_NODE);
    let path_map: HashMap<String, String> = Category::ALL
        .iter()
        .map(|c| (c.as_str().to_string(), c.as_str().to_string()))
        .collect();
    graph.add_conditional_edges(CLASSIFY_NODE, Arc::new(route_ticket), Some(path_map));
    graph.add_edge(FORMAT_NODE, END);
    graph.compile()
}
