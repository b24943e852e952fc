pub mod openai;
pub mod provider;
pub mod scripted;
pub mod types;

pub use openai::ChatCompletionsClient;
pub use provider::Transport;
pub use scripted::ScriptedTransport;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ToolDeclaration, ToolInputSchema};
