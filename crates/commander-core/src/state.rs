//! UI-agnostic conversation state types
//!
//! This module contains data structures that are shared between the chat
//! controller and whatever surface renders it, and don't depend on any
//! specific UI framework.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A role-tagged turn as sent to the completion provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// The role of a chat message sender on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Who wrote a message in the conversation log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Commander,
}

impl Sender {
    pub fn role(self) -> ChatRole {
        match self {
            Sender::User => ChatRole::User,
            Sender::Commander => ChatRole::Assistant,
        }
    }
}

/// Session-unique message id; later messages always get larger ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

/// One entry of the conversation log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Local>,
    pub planet_context: Option<String>,
}

impl Message {
    /// 24-hour `HH:MM` for display next to the message
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.sender.role(),
            content: self.content.clone(),
        }
    }
}

/// Everything a surface needs to draw the conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub is_visible: bool,
    pub is_typing: bool,
    pub current_planet_context: Option<String>,
    pub input_value: String,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            is_visible: true,
            is_typing: false,
            current_planet_context: None,
            input_value: String::new(),
        }
    }
}

impl ChatState {
    /// Location readout: the active planet, or deep space
    pub fn location_label(&self) -> &str {
        self.current_planet_context.as_deref().unwrap_or("DEEP SPACE")
    }

    /// The last `n` messages as provider turns, oldest first
    pub fn recent_history(&self, n: usize) -> Vec<ChatMessage> {
        let start = self.messages.len().saturating_sub(n);
        self.messages[start..]
            .iter()
            .map(Message::to_chat_message)
            .collect()
    }
}
