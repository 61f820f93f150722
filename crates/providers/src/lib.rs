pub mod openai;

use anyhow::Result;
use async_trait::async_trait;
use shared::chat::ChatTurn;

/// A callable capability advertised to the completion API.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema for the arguments object.
    pub parameters: serde_json::Value,
}

/// What the API asked for in return: plain text, or a function invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Message(String),
    ToolCall {
        name: String,
        arguments: serde_json::Value,
    },
}

/// A chat-completion backend, seen from the session's side: one request,
/// one full response. No streaming.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, turns: &[ChatTurn], tools: Option<&[ToolSpec]>)
        -> Result<Completion>;
}
