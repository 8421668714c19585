use std::time::Duration;

use page_logging::{page_debug, page_warn};
use reqwest::header::{HeaderValue, CONTENT_TYPE};

use crate::{ChatEndpoint, ChatReply, ChatRequest, DeliveryError};

/// Body field carrying the message text.
pub const MESSAGE_FIELD: &str = "message";
/// Body field carrying the anti-forgery token.
pub const ANTI_FORGERY_FIELD: &str = "csrfmiddlewaretoken";
/// Header echoing the anti-forgery token.
pub const ANTI_FORGERY_HEADER: &str = "X-CSRFToken";

const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Transport tuning. Nothing is enforced beyond the client defaults unless set.
#[derive(Debug, Clone, Default)]
pub struct DeliverySettings {
    pub request_timeout: Option<Duration>,
}

#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    async fn deliver(&self, request: &ChatRequest) -> Result<ChatReply, DeliveryError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    endpoint: ChatEndpoint,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(endpoint: ChatEndpoint, settings: DeliverySettings) -> Result<Self, DeliveryError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| DeliveryError::Network(err.to_string()))?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &ChatEndpoint {
        &self.endpoint
    }

    fn encode_body(&self, message: &str) -> String {
        let mut form = url::form_urlencoded::Serializer::new(String::new());
        form.append_pair(MESSAGE_FIELD, message);
        if let Some(token) = self.endpoint.anti_forgery_token.as_deref() {
            form.append_pair(ANTI_FORGERY_FIELD, token);
        }
        form.finish()
    }
}

#[async_trait::async_trait]
impl ChatTransport for ReqwestTransport {
    async fn deliver(&self, request: &ChatRequest) -> Result<ChatReply, DeliveryError> {
        let mut builder = self
            .client
            .post(self.endpoint.url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
            .body(self.encode_body(&request.message));
        if let Some(token) = self.endpoint.anti_forgery_token.as_deref() {
            // A token with bytes a header cannot carry still goes in the body.
            match HeaderValue::from_str(token) {
                Ok(value) => builder = builder.header(ANTI_FORGERY_HEADER, value),
                Err(err) => page_warn!(
                    "request_id={} anti-forgery token not sent as header: {}",
                    request.request_id,
                    err
                ),
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|err| DeliveryError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| DeliveryError::Network(err.to_string()))?;
        page_debug!(
            "request_id={} status={} body_len={}",
            request.request_id,
            status.as_u16(),
            body.len()
        );

        serde_json::from_slice::<ChatReply>(&body)
            .map_err(|err| DeliveryError::InvalidBody(err.to_string()))
    }
}
