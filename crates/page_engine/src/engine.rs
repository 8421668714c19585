use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use page_logging::{page_error, page_info, page_warn};

use crate::deliver::{ChatTransport, DeliverySettings, ReqwestTransport};
use crate::{ChatEndpoint, ChatRequest, DeliveryError, EngineEvent, RequestId};

enum EngineCommand {
    Deliver(ChatRequest),
}

/// Runs deliveries on a background tokio runtime. Each submitted request
/// runs to completion or failure; there is no cancellation.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(endpoint: ChatEndpoint, settings: DeliverySettings) -> Result<Self, DeliveryError> {
        let transport = ReqwestTransport::new(endpoint, settings)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn ChatTransport>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    page_error!("Failed to start delivery runtime: {}", err);
                    fail_pending(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport.as_ref(), command, event_tx).await;
                });
            }
            // Let in-flight deliveries finish before the runtime drops.
            runtime.shutdown_timeout(Duration::from_secs(5));
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request_id: RequestId, message: impl Into<String>) {
        let command = EngineCommand::Deliver(ChatRequest {
            request_id,
            message: message.into(),
        });
        if self.cmd_tx.send(command).is_err() {
            page_warn!("request_id={} dropped: delivery thread is gone", request_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    transport: &dyn ChatTransport,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Deliver(request) => {
            page_info!(
                "Deliver request_id={} message_len={}",
                request.request_id,
                request.message.len()
            );
            let result = transport.deliver(&request).await;
            if let Err(err) = &result {
                page_warn!("request_id={} delivery failed: {:?}", request.request_id, err);
            }
            let _ = event_tx.send(EngineEvent::Delivered {
                request_id: request.request_id,
                result,
            });
        }
    }
}

/// Without a runtime nothing can be delivered; every request fails with
/// the runtime error so the page still re-enables its submit control.
fn fail_pending(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(EngineCommand::Deliver(request)) = cmd_rx.recv() {
        let _ = event_tx.send(EngineEvent::Delivered {
            request_id: request.request_id,
            result: Err(DeliveryError::Network(reason.to_string())),
        });
    }
}
