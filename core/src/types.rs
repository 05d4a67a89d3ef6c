use serde::{Deserialize, Serialize};

/// Helper struct to encapsulate model details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CompletionModel {
    pub api_key: String,
    pub model_name: String,
}

impl CompletionModel {
    pub fn new(api_key: String, model_name: Option<String>) -> Self {
        Self {
            api_key,
            model_name: model_name.unwrap_or_else(|| "gpt-4o".to_string()),
        }
    }
}

/// Request to the completion service
#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,
}

/// Response format constraint for the completion service
#[derive(Serialize, Debug, Clone)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// Constrain the response to a single JSON object
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// One message in a chat completion request
#[derive(Serialize, Clone, Debug)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: String) -> Self {
        Self {
            role: "system".to_string(),
            content: MessageContent::Text(text),
        }
    }

    pub fn user(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Parts(parts),
        }
    }
}

/// Message content: either a bare string or a multimodal part list
#[derive(Serialize, Clone, Debug)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One part of a multimodal user message
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: String) -> Self {
        Self::Text { text }
    }

    /// Wrap an already-encoded data URI as an image part
    pub fn image(data_uri: String) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: data_uri },
        }
    }
}

/// Image reference inside a content part
#[derive(Serialize, Clone, Debug)]
pub struct ImageUrl {
    pub url: String,
}

/// Response from the completion service
#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

/// Candidate choice in the response
#[derive(Deserialize, Debug)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Assistant message in a response choice
#[derive(Deserialize, Debug)]
pub struct ResponseMessage {
    pub content: Option<String>,
}
