use std::sync::{Arc, Mutex};
use std::time::Duration;

use page_engine::{
    ChatReply, ChatRequest, ChatTransport, DeliveryError, EngineEvent, EngineHandle, ReplyMessage,
};
use pretty_assertions::assert_eq;

/// Answers every request with a canned result and records what it saw.
struct ScriptedTransport {
    seen: Mutex<Vec<ChatRequest>>,
    fail: bool,
}

#[async_trait::async_trait]
impl ChatTransport for ScriptedTransport {
    async fn deliver(&self, request: &ChatRequest) -> Result<ChatReply, DeliveryError> {
        self.seen.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(DeliveryError::Network("connection refused".to_string()));
        }
        Ok(ChatReply {
            messages: vec![ReplyMessage {
                role: "assistant".to_string(),
                content: format!("echo: {}", request.message),
            }],
        })
    }
}

fn engine(fail: bool) -> (EngineHandle, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport {
        seen: Mutex::new(Vec::new()),
        fail,
    });
    (EngineHandle::with_transport(transport.clone()), transport)
}

#[test]
fn submitted_request_comes_back_as_delivered_event() {
    page_logging::initialize_for_tests();
    let (engine, transport) = engine(false);
    engine.submit(7, "ping");

    let event = engine
        .recv_timeout(Duration::from_secs(5))
        .expect("delivery event");
    assert_eq!(
        event,
        EngineEvent::Delivered {
            request_id: 7,
            result: Ok(ChatReply {
                messages: vec![ReplyMessage {
                    role: "assistant".to_string(),
                    content: "echo: ping".to_string(),
                }],
            }),
        }
    );
    assert_eq!(transport.seen.lock().unwrap().len(), 1);
    assert!(engine.try_recv().is_none());
}

#[test]
fn transport_failure_is_reported_not_swallowed() {
    page_logging::initialize_for_tests();
    let (engine, _transport) = engine(true);
    engine.submit(3, "ping");

    let event = engine
        .recv_timeout(Duration::from_secs(5))
        .expect("delivery event");
    assert_eq!(
        event,
        EngineEvent::Delivered {
            request_id: 3,
            result: Err(DeliveryError::Network("connection refused".to_string())),
        }
    );
}
