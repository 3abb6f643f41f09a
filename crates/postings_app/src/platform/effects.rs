use std::path::PathBuf;
use std::time::Duration;

use postings_core::{
    Effect, Msg, Notification, PayloadSource, RankedResult, RequestFailure, SubmissionAck,
    SubmissionOrigin,
};
use postings_engine::{
    csv_copy_filename, ApiError, AtomicFileWriter, EngineError, EngineEvent, EngineHandle,
    FailureKind, UploadBody, UploadRequest, WireRankedResult,
};
use postings_logging::{postings_debug, postings_error, postings_info, postings_warn};

use super::persistence::Settings;

/// Executes core effects against the engine and turns engine events back
/// into core messages.
pub struct EffectRunner {
    engine: EngineHandle,
    csv_copy_dir: Option<PathBuf>,
}

impl EffectRunner {
    pub fn new(settings: &Settings) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings.client_settings())?;
        Ok(Self {
            engine,
            csv_copy_dir: settings.csv_copy_dir.clone(),
        })
    }

    /// Starts network work for each effect; notifications are handed back
    /// to the caller for display.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Notification> {
        let mut notifications = Vec::new();
        for effect in effects {
            match effect {
                Effect::UploadPayload { payload, origin } => {
                    let (filename, media_type, source) = payload.into_parts();
                    postings_info!(
                        "UploadPayload filename={} media_type={} origin={:?}",
                        filename,
                        media_type,
                        origin
                    );
                    if let Some(bytes) = form_csv(origin, &source) {
                        self.save_copy(&filename, bytes);
                    }
                    let body = match source {
                        PayloadSource::Bytes(bytes) => UploadBody::Bytes(bytes),
                        PayloadSource::FileHandle(path) => UploadBody::File(path),
                    };
                    self.engine.upload(UploadRequest {
                        filename,
                        media_type: media_type.to_string(),
                        body,
                    });
                }
                Effect::RunQuery { text } => {
                    postings_info!("RunQuery text_len={}", text.len());
                    self.engine.query(text);
                }
                Effect::Notify(notification) => notifications.push(notification),
            }
        }
        notifications
    }

    /// Waits up to `timeout` for the next completed request.
    pub fn next_msg(&self, timeout: Duration) -> Result<Option<Msg>, EngineError> {
        Ok(self.engine.recv_timeout(timeout)?.map(map_event))
    }

    pub fn try_next_msg(&self) -> Result<Option<Msg>, EngineError> {
        Ok(self.engine.try_recv()?.map(map_event))
    }

    fn save_copy(&self, filename: &str, bytes: &[u8]) {
        let Some(dir) = &self.csv_copy_dir else {
            return;
        };
        let name = csv_copy_filename(filename, bytes);
        match AtomicFileWriter::new(dir.clone()).write(&name, bytes) {
            Ok(path) => postings_info!("Saved CSV copy to {:?}", path),
            Err(err) => postings_error!("Could not save CSV copy in {:?}: {}", dir, err),
        }
    }
}

/// The encoded CSV of a form submission; user files are never copied.
fn form_csv(origin: SubmissionOrigin, source: &PayloadSource) -> Option<&[u8]> {
    match (origin, source) {
        (SubmissionOrigin::Form, PayloadSource::Bytes(bytes)) => Some(bytes.as_slice()),
        _ => None,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { filename, result } => {
            postings_debug!("Upload of {} completed ok={}", filename, result.is_ok());
            Msg::SubmissionFinished(
                result
                    .map(|ack| SubmissionAck {
                        server_echo: ack.message,
                    })
                    .map_err(map_failure),
            )
        }
        EngineEvent::SearchCompleted { query, result } => {
            postings_debug!(
                "Search for {:?} completed with {:?} results",
                query,
                result.as_ref().map(Vec::len).ok()
            );
            Msg::SearchFinished(
                result
                    .map(|rows| rows.into_iter().map(map_ranked).collect())
                    .map_err(map_failure),
            )
        }
    }
}

fn map_failure(err: ApiError) -> RequestFailure {
    match err.kind {
        FailureKind::Server { status, reported } => RequestFailure::Server {
            status,
            message: reported,
        },
        _ => {
            postings_warn!("Transport failure: {}", err);
            RequestFailure::Transport {
                cause: err.to_string(),
            }
        }
    }
}

fn map_ranked(row: WireRankedResult) -> RankedResult {
    RankedResult {
        id: row.id.map(|id| id.to_string()),
        title: row.title.unwrap_or_default(),
        snippet: row.snippet,
        description: row.description,
        url: row.url,
        display_url: row.display_url,
    }
}
