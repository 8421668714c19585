//! Page engine: chat message delivery and effect execution.
mod deliver;
mod engine;
mod types;

pub use deliver::{
    ChatTransport, DeliverySettings, ReqwestTransport, ANTI_FORGERY_FIELD, ANTI_FORGERY_HEADER,
    MESSAGE_FIELD,
};
pub use engine::EngineHandle;
pub use types::{
    ChatEndpoint, ChatReply, ChatRequest, DeliveryError, EngineEvent, ReplyMessage, RequestId,
    HTTP_FAILURE_TEXT,
};
