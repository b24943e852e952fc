//! Chat completions API types
//!
//! These types serialize/deserialize with OpenAI-compatible `/chat/completions`
//! endpoints. Conversion to and from the crate's [`Turn`] happens here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::conversation::{Role, ToolCall, Turn};

// ============================================================================
// Tool Declarations
// ============================================================================

/// The contract advertised to the model for one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: ToolInputSchema,
}

/// JSON schema for tool input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInputSchema {
    /// Schema type (always "object")
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Properties of the input object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,

    /// Required property names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ToolInputSchema {
    /// Create a new empty object schema
    pub fn new() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: None,
            required: None,
        }
    }

    /// Set properties
    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Set required fields
    pub fn with_required(mut self, required: &[&str]) -> Self {
        self.required = Some(required.iter().map(|s| s.to_string()).collect());
        self
    }
}

impl Default for ToolInputSchema {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for `POST /chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
}

/// A message on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    pub function: WireFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: WireFunctionDefinition,
}

#[derive(Debug, Clone, Serialize)]
pub struct WireFunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: ToolInputSchema,
}

fn function_type() -> String {
    "function".to_string()
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&Turn> for ChatMessage {
    fn from(turn: &Turn) -> Self {
        let tool_calls = if turn.tool_calls.is_empty() {
            None
        } else {
            Some(
                turn.tool_calls
                    .iter()
                    .map(|call| WireToolCall {
                        id: call.id.clone(),
                        call_type: function_type(),
                        function: WireFunctionCall {
                            name: call.name.clone(),
                            arguments: call.arguments.clone(),
                        },
                    })
                    .collect(),
            )
        };

        Self {
            role: turn.role.as_str().to_string(),
            content: Some(turn.text.clone()),
            tool_calls,
            tool_call_id: turn.tool_call_id.clone(),
        }
    }
}

impl From<&ToolDeclaration> for WireTool {
    fn from(declaration: &ToolDeclaration) -> Self {
        Self {
            tool_type: function_type(),
            function: WireFunctionDefinition {
                name: declaration.name.clone(),
                description: declaration.description.clone(),
                parameters: declaration.parameters.clone(),
            },
        }
    }
}

impl ChatMessage {
    /// Convert a response message into an assistant turn
    ///
    /// Tool calls of any type other than `function` are dropped.
    pub fn into_assistant_turn(self) -> Turn {
        let tool_calls = self
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter(|call| call.call_type == "function")
            .map(|call| ToolCall::new(call.id, call.function.name, call.function.arguments))
            .collect();

        Turn {
            role: Role::Assistant,
            text: self.content.unwrap_or_default(),
            tool_calls,
            tool_call_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_turn_serializes_call_id() {
        let message = ChatMessage::from(&Turn::tool("call-1", "ok"));
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({"role": "tool", "content": "ok", "tool_call_id": "call-1"})
        );
    }

    #[test]
    fn test_assistant_turn_serializes_tool_calls() {
        let turn = Turn::assistant_with_calls(
            "",
            vec![ToolCall::new("c1", "read_file", r#"{"path":"a.txt"}"#)],
        );
        let value = serde_json::to_value(ChatMessage::from(&turn)).unwrap();
        assert_eq!(value["tool_calls"][0]["type"], "function");
        assert_eq!(value["tool_calls"][0]["function"]["name"], "read_file");
        assert_eq!(
            value["tool_calls"][0]["function"]["arguments"],
            r#"{"path":"a.txt"}"#
        );
    }

    #[test]
    fn test_response_message_into_turn() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [
                        {"id": "a", "type": "function", "function": {"name": "list_dir", "arguments": "{}"}},
                        {"id": "b", "type": "retrieval", "function": {"name": "x", "arguments": "{}"}}
                    ]
                },
                "finish_reason": "tool_calls"
            }]
        }))
        .unwrap();

        let turn = response.choices.into_iter().next().unwrap().message.into_assistant_turn();
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.text, "");
        assert_eq!(turn.tool_calls.len(), 1);
        assert_eq!(turn.tool_calls[0].name, "list_dir");
    }

    #[test]
    fn test_declaration_to_wire_tool() {
        let declaration = ToolDeclaration {
            name: "read_file".to_string(),
            description: "Read a file".to_string(),
            parameters: ToolInputSchema::new()
                .with_properties(json!({"path": {"type": "string"}}))
                .with_required(&["path"]),
        };
        let value = serde_json::to_value(WireTool::from(&declaration)).unwrap();
        assert_eq!(value["type"], "function");
        assert_eq!(value["function"]["parameters"]["type"], "object");
        assert_eq!(value["function"]["parameters"]["required"], json!(["path"]));
    }
}
