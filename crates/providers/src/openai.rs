use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::chat::ChatTurn;
use std::sync::LazyLock;
use std::time::Duration;

use crate::{Completion, CompletionClient, ToolSpec};

static SHARED_HTTP: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .pool_max_idle_per_host(2)
        .build()
        .expect("failed to build HTTP client")
});

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

// ── Request types ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<ChatTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAITool>>,
}

/// OpenAI function-calling tool definition.
#[derive(Debug, Clone, Serialize)]
struct OpenAITool {
    #[serde(rename = "type")]
    tool_type: String,
    function: OpenAIFunction,
}

#[derive(Debug, Clone, Serialize)]
struct OpenAIFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

fn to_openai_tool(tool: &ToolSpec) -> OpenAITool {
    OpenAITool {
        tool_type: "function".to_string(),
        function: OpenAIFunction {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

// ── Response types ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIToolCall {
    function: OpenAIToolCallFunction,
}

#[derive(Debug, Deserialize)]
struct OpenAIToolCallFunction {
    name: String,
    /// JSON-encoded arguments object, sent as a string.
    arguments: String,
}

/// Collapse a response body into the session-facing completion. A tool
/// call wins over any accompanying text; arguments that fail to decode
/// fall back to an empty object so the caller sees a uniform shape.
fn completion_from_response(body: OpenAIResponse) -> Result<Completion> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("openai returned no choices"))?;

    if let Some(calls) = choice.message.tool_calls {
        if let Some(call) = calls.into_iter().next() {
            let arguments: serde_json::Value = serde_json::from_str(&call.function.arguments)
                .unwrap_or(serde_json::Value::Object(Default::default()));
            return Ok(Completion::ToolCall {
                name: call.function.name,
                arguments,
            });
        }
    }

    Ok(Completion::Message(choice.message.content.unwrap_or_default()))
}

// ── Client ───────────────────────────────────────────────────────────

pub struct OpenAIClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: SHARED_HTTP.clone(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at an OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(
        &self,
        turns: &[ChatTurn],
        tools: Option<&[ToolSpec]>,
    ) -> Result<Completion> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let tools = match tools {
            Some(specs) if !specs.is_empty() => {
                Some(specs.iter().map(to_openai_tool).collect())
            }
            _ => None,
        };
        let req = OpenAIRequest {
            model: self.model.clone(),
            messages: turns.to_vec(),
            tools,
        };
        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&req)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let detail: String = body.chars().take(800).collect();
            if detail.trim().is_empty() {
                return Err(anyhow!("openai error: {}", status));
            }
            return Err(anyhow!("openai error: {}\n{}", status, detail));
        }
        let body: OpenAIResponse = resp.json().await?;
        completion_from_response(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> Result<Completion> {
        let response: OpenAIResponse = serde_json::from_value(body).unwrap();
        completion_from_response(response)
    }

    #[test]
    fn test_request_serializes_roles_and_tools() {
        let req = OpenAIRequest {
            model: "gpt-4.1-nano".to_string(),
            messages: vec![ChatTurn::system("seed"), ChatTurn::user("hi")],
            tools: Some(vec![to_openai_tool(&ToolSpec {
                name: "open_file".to_string(),
                description: "Open a file".to_string(),
                parameters: json!({"type": "object"}),
            })]),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["tools"][0]["type"], "function");
        assert_eq!(value["tools"][0]["function"]["name"], "open_file");
        assert_eq!(value["tools"][0]["function"]["parameters"]["type"], "object");
    }

    #[test]
    fn test_request_omits_tools_when_absent() {
        let req = OpenAIRequest {
            model: "gpt-4.1-nano".to_string(),
            messages: vec![ChatTurn::user("hi")],
            tools: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_text_response_becomes_message() {
        let completion = parse(json!({
            "choices": [{"message": {"content": "hello there"}}]
        }))
        .unwrap();
        assert_eq!(completion, Completion::Message("hello there".to_string()));
    }

    #[test]
    fn test_tool_call_arguments_decode_from_string() {
        let completion = parse(json!({
            "choices": [{"message": {
                "tool_calls": [{
                    "id": "call_1",
                    "function": {
                        "name": "open_file",
                        "arguments": "{\"file_path\": \"/tmp/report.pdf\"}"
                    }
                }]
            }}]
        }))
        .unwrap();
        match completion {
            Completion::ToolCall { name, arguments } => {
                assert_eq!(name, "open_file");
                assert_eq!(arguments["file_path"], "/tmp/report.pdf");
            }
            other => panic!("unexpected completion: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_arguments_decode_to_empty_object() {
        let completion = parse(json!({
            "choices": [{"message": {
                "tool_calls": [{
                    "function": {"name": "open_file", "arguments": "not json"}
                }]
            }}]
        }))
        .unwrap();
        assert_eq!(
            completion,
            Completion::ToolCall {
                name: "open_file".to_string(),
                arguments: json!({}),
            }
        );
    }

    #[test]
    fn test_tool_call_wins_over_text() {
        let completion = parse(json!({
            "choices": [{"message": {
                "content": "Opening that for you",
                "tool_calls": [{
                    "function": {"name": "open_file", "arguments": "{\"file_path\": \"a.txt\"}"}
                }]
            }}]
        }))
        .unwrap();
        assert!(matches!(completion, Completion::ToolCall { .. }));
    }

    #[test]
    fn test_missing_content_becomes_empty_message() {
        let completion = parse(json!({"choices": [{"message": {}}]})).unwrap();
        assert_eq!(completion, Completion::Message(String::new()));
    }

    #[test]
    fn test_no_choices_is_an_error() {
        assert!(parse(json!({"choices": []})).is_err());
    }
}
