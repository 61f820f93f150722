//! Conversation state and the remote exchange.

use std::sync::Arc;

use anyhow::Result;
use providers::{Completion, CompletionClient, ToolSpec};
use serde_json::json;
use services::launcher::FileLauncher;
use shared::chat::ChatTurn;
use tracing::warn;

/// Seed system turn for every fresh conversation.
const SEED_PROMPT: &str = "You are an assistant that can chat and open files by keyword.";

/// Name of the single capability advertised to the API.
const OPEN_FILE_TOOL: &str = "open_file";

fn open_file_tool() -> ToolSpec {
    ToolSpec {
        name: OPEN_FILE_TOOL.to_string(),
        description: "Open the given file with the operating system's default application"
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Full path of the file to open, e.g. C:\\Users\\User\\Desktop\\file.pdf"
                }
            },
            "required": ["file_path"]
        }),
    }
}

/// An owned conversation: the ordered turn history plus the client that
/// continues it. Turns only accumulate; [`ChatSession::reset`] restores
/// the seed turn.
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    client: Arc<dyn CompletionClient>,
    launcher: Arc<FileLauncher>,
}

impl ChatSession {
    pub fn new(client: Arc<dyn CompletionClient>, launcher: Arc<FileLauncher>) -> Self {
        Self {
            turns: vec![ChatTurn::system(SEED_PROMPT)],
            client,
            launcher,
        }
    }

    /// The full history, seed turn first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Drop everything but the seed system turn.
    pub fn reset(&mut self) {
        self.turns.truncate(1);
    }

    /// One exchange with the API. The user turn is appended first; if the
    /// request itself fails it is rolled back, leaving the history exactly
    /// as it was before the call.
    pub async fn send(&mut self, user_text: &str, allow_functions: bool) -> Result<String> {
        self.turns.push(ChatTurn::user(user_text));

        let tool = allow_functions.then(open_file_tool);
        let tools = tool.as_ref().map(std::slice::from_ref);

        let completion = match self.client.complete(&self.turns, tools).await {
            Ok(completion) => completion,
            Err(err) => {
                self.turns.pop();
                return Err(err);
            }
        };

        match completion {
            Completion::Message(text) => {
                self.turns.push(ChatTurn::assistant(text.clone()));
                Ok(text)
            }
            Completion::ToolCall { name, arguments } if name == OPEN_FILE_TOOL => {
                let path = match arguments.get("file_path").and_then(|v| v.as_str()) {
                    Some(path) => path.to_string(),
                    None => {
                        warn!("open_file call carried no file_path argument");
                        return Ok("⚠️ open_file call without a file_path argument".to_string());
                    }
                };
                let report = self.launcher.launch_report(&[path]);
                self.turns
                    .push(ChatTurn::assistant(format!("(executed open_file) {report}")));
                Ok(report)
            }
            Completion::ToolCall { name, .. } => {
                warn!("api requested unknown function {:?}", name);
                Ok(format!("⚠️ Unrecognized function call: {name}"))
            }
        }
    }
}
