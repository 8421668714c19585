use serde::{Deserialize, Deserializer};
use thiserror::Error;
use url::Url;

pub type RequestId = u64;

/// Message shown for any non-success HTTP status.
pub const HTTP_FAILURE_TEXT: &str = "Failed to send message.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEndpoint {
    pub url: Url,
    pub anti_forgery_token: Option<String>,
}

impl ChatEndpoint {
    pub fn new(url: Url, anti_forgery_token: Option<String>) -> Self {
        Self {
            url,
            anti_forgery_token: anti_forgery_token.filter(|token| !token.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub request_id: RequestId,
    pub message: String,
}

/// Success body: `{"messages": [{"role": ..., "content": ...}, ...]}`.
///
/// Decoding is lenient the way a page script reading the JSON would be: a
/// missing or null `messages` is an empty list, and entries that are not
/// `{role, content}` objects are skipped instead of failing the reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "lenient_messages")]
    pub messages: Vec<ReplyMessage>,
}

/// Roles stay raw strings here; mapping to known roles is the caller's call.
/// A missing or null role or content decodes as empty text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplyMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_messages<'de, D>(deserializer: D) -> Result<Vec<ReplyMessage>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("{}", HTTP_FAILURE_TEXT)]
    HttpStatus(u16),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    InvalidBody(String),
}

impl DeliveryError {
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Delivered {
        request_id: RequestId,
        result: Result<ChatReply, DeliveryError>,
    },
}
