use anyhow::{Context, Result};
use page_core::{ChatEffect, ChatMsg, Message, Role};
use page_engine::{ChatEndpoint, DeliverySettings, EngineEvent, EngineHandle};
use page_logging::{page_info, page_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(endpoint: ChatEndpoint, settings: DeliverySettings) -> Result<Self> {
        let engine = EngineHandle::new(endpoint, settings).context("building HTTP client")?;
        Ok(Self { engine })
    }

    /// Starts deliveries. Returns true when the thread should be scrolled.
    pub fn enqueue(&self, effects: Vec<ChatEffect>) -> bool {
        let mut scroll = false;
        for effect in effects {
            match effect {
                ChatEffect::PostMessage { request_id, text } => {
                    page_info!("PostMessage request_id={} text_len={}", request_id, text.len());
                    self.engine.submit(request_id, text);
                }
                ChatEffect::ScrollToBottom => scroll = true,
            }
        }
        scroll
    }

    /// Drains finished deliveries as chat messages.
    pub fn poll(&self) -> Vec<ChatMsg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: EngineEvent) -> ChatMsg {
    match event {
        EngineEvent::Delivered { request_id, result } => match result {
            Ok(reply) => ChatMsg::ReplyReceived {
                request_id,
                messages: reply
                    .messages
                    .into_iter()
                    .filter_map(|message| {
                        Role::from_wire(&message.role)
                            .map(|role| Message::new(role, message.content))
                    })
                    .collect(),
            },
            Err(err) => {
                page_warn!("request_id={} failed: {}", request_id, err);
                ChatMsg::DeliveryFailed {
                    request_id,
                    reason: Some(err.to_string()),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_engine::{ChatReply, DeliveryError, ReplyMessage};
    use pretty_assertions::assert_eq;

    fn reply(role: &str, content: &str) -> ReplyMessage {
        ReplyMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn reply_drops_unknown_roles() {
        let event = EngineEvent::Delivered {
            request_id: 4,
            result: Ok(ChatReply {
                messages: vec![
                    reply("system", "be nice"),
                    reply("", "no role"),
                    reply("user", "hi"),
                    reply("assistant", "hello"),
                ],
            }),
        };

        assert_eq!(
            map_event(event),
            ChatMsg::ReplyReceived {
                request_id: 4,
                messages: vec![
                    Message::new(Role::User, "hi"),
                    Message::new(Role::Assistant, "hello"),
                ],
            }
        );
    }

    #[test]
    fn failure_carries_error_text() {
        let event = EngineEvent::Delivered {
            request_id: 2,
            result: Err(DeliveryError::HttpStatus(403)),
        };

        assert_eq!(
            map_event(event),
            ChatMsg::DeliveryFailed {
                request_id: 2,
                reason: Some("Failed to send message.".to_string()),
            }
        );
    }
}
