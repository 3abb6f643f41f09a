use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use postings_logging::postings_debug;

use crate::client::{ClientSettings, ReqwestApi, SearchApi};
use crate::{ApiError, EngineEvent, UploadRequest};

enum EngineCommand {
    Upload(UploadRequest),
    Query { text: String },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid client settings: {0}")]
    Client(#[from] ApiError),
    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(std::io::Error),
    #[error("engine thread stopped")]
    Stopped,
}

/// Runs API calls on a background tokio runtime and hands completions back
/// over a channel, so the caller's event loop never blocks on the network.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let api = ReqwestApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn SearchApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("postings-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), command, event_tx).await;
                    });
                }
                postings_debug!("Engine command channel closed");
            })
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn upload(&self, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Upload(request));
    }

    pub fn query(&self, text: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Query { text: text.into() });
    }

    /// `Ok(None)` when nothing has completed yet; `Stopped` once the engine
    /// thread is gone and no further events can arrive.
    pub fn try_recv(&self) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(EngineError::Stopped),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Stopped),
        }
    }
}

async fn handle_command(
    api: &dyn SearchApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Upload(request) => {
            let filename = request.filename.clone();
            let result = api.upload(request).await;
            EngineEvent::UploadCompleted { filename, result }
        }
        EngineCommand::Query { text } => {
            let result = api.query(&text).await;
            EngineEvent::SearchCompleted {
                query: text,
                result,
            }
        }
    };
    let _ = event_tx.send(event);
}
