//! Message-history state shared by the chat and tool-loop graphs.

use serde::{Deserialize, Serialize};

use crate::channels::{Channel, GraphState, Topic};
use crate::memory::ConversationState;
use crate::message::Message;

/// State whose only field is an append-only message history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesState {
    pub messages: Topic<Message>,
}

/// Messages to append after a step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessagesUpdate {
    pub messages: Vec<Message>,
}

impl MessagesUpdate {
    pub fn one(message: Message) -> Self {
        Self {
            messages: vec![message],
        }
    }
}

impl MessagesState {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages: Topic::from(messages),
        }
    }

    /// Convenience: a state holding one user message.
    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(vec![Message::user(content)])
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Text of the latest assistant message, if any.
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_assistant())
            .map(Message::content)
    }
}

impl GraphState for MessagesState {
    type Update = MessagesUpdate;

    fn merge(&mut self, update: MessagesUpdate) {
        self.messages.merge(update.messages);
    }
}

impl ConversationState for MessagesState {
    type Message = Message;

    fn from_messages(messages: Vec<Message>) -> Self {
        Self::new(messages)
    }

    fn messages(&self) -> &[Message] {
        self.messages.as_slice()
    }
}
