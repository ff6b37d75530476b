use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use previewer_logging::{log_debug, log_error, log_info, log_warn};

use crate::api::{ApiSettings, PreviewApi, ReqwestPreviewApi};
use crate::types::RequestId;
use crate::{ApiError, EngineEvent, FailureKind};

enum EngineCommand {
    Submit {
        request_id: RequestId,
        url: String,
    },
    FetchHistory {
        request_id: RequestId,
        cursor: Option<String>,
        limit: u32,
    },
}

impl EngineCommand {
    /// The completion reported when the command never reaches the worker.
    fn into_failure(self, error: ApiError) -> EngineEvent {
        match self {
            EngineCommand::Submit { request_id, .. } => EngineEvent::SubmitCompleted {
                request_id,
                result: Err(error),
            },
            EngineCommand::FetchHistory { request_id, .. } => EngineEvent::HistoryCompleted {
                request_id,
                result: Err(error),
            },
        }
    }
}

/// Runs service calls on a background tokio runtime so the UI thread never
/// blocks. Requests cannot be cancelled once issued; if the handle is
/// dropped, results that arrive afterwards are discarded.
///
/// Every request settles: if the worker is gone, the request completes with a
/// network failure instead of being lost.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
    next_request_id: RequestId,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let api = ReqwestPreviewApi::new(settings)?;
        Ok(Self::with_api(Arc::new(api)))
    }

    pub fn with_api(api: Arc<dyn PreviewApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let worker_tx = event_tx.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    log_error!("failed to start engine runtime: {err}");
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = worker_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
            log_debug!("engine command channel closed");
        });

        Self {
            cmd_tx,
            event_tx,
            event_rx,
            next_request_id: 1,
        }
    }

    pub fn submit(&mut self, url: impl Into<String>) -> RequestId {
        let request_id = self.take_request_id();
        self.send_command(EngineCommand::Submit {
            request_id,
            url: url.into(),
        });
        request_id
    }

    pub fn fetch_history(&mut self, cursor: Option<String>, limit: u32) -> RequestId {
        let request_id = self.take_request_id();
        self.send_command(EngineCommand::FetchHistory {
            request_id,
            cursor,
            limit,
        });
        request_id
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send_command(&self, command: EngineCommand) {
        if let Err(mpsc::SendError(command)) = self.cmd_tx.send(command) {
            log_warn!("engine worker stopped; failing request");
            let error = ApiError::new(FailureKind::Network, "engine stopped");
            // The handle owns the receiving end, so this send cannot fail.
            let _ = self.event_tx.send(command.into_failure(error));
        }
    }

    fn take_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}

async fn handle_command(
    api: &dyn PreviewApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Submit { request_id, url } => {
            log_info!("request #{request_id}: submit url={url}");
            let result = api.submit_url(&url).await;
            EngineEvent::SubmitCompleted { request_id, result }
        }
        EngineCommand::FetchHistory {
            request_id,
            cursor,
            limit,
        } => {
            log_info!("request #{request_id}: history cursor={cursor:?} limit={limit}");
            let result = api.get_history(cursor.as_deref(), limit).await;
            EngineEvent::HistoryCompleted { request_id, result }
        }
    };
    if event_tx.send(event).is_err() {
        log_debug!("engine result dropped: receiver gone");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::{EngineEvent, EngineHandle};
    use crate::FailureKind;

    fn handle_with_stopped_worker() -> EngineHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        drop(cmd_rx);
        let (event_tx, event_rx) = mpsc::channel();
        EngineHandle {
            cmd_tx,
            event_tx,
            event_rx,
            next_request_id: 1,
        }
    }

    #[test]
    fn requests_to_a_stopped_worker_settle_as_failures() {
        previewer_logging::initialize_for_tests();
        let mut engine = handle_with_stopped_worker();

        let submit_id = engine.submit("https://example.com");
        let history_id = engine.fetch_history(None, 10);

        match engine.try_recv() {
            Some(EngineEvent::SubmitCompleted {
                request_id,
                result: Err(err),
            }) => {
                assert_eq!(request_id, submit_id);
                assert_eq!(err.kind, FailureKind::Network);
                assert_eq!(err.message, "engine stopped");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        match engine.try_recv() {
            Some(EngineEvent::HistoryCompleted {
                request_id,
                result: Err(err),
            }) => {
                assert_eq!(request_id, history_id);
                assert_eq!(err.kind, FailureKind::Network);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(engine.try_recv().is_none());
    }
}
