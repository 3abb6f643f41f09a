use crate::{CsvPayload, SubmissionOrigin, SubmissionResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload the payload once, as multipart field `file`.
    UploadPayload {
        payload: CsvPayload,
        origin: SubmissionOrigin,
    },
    /// Post `{ "text": text }` to the query endpoint once.
    RunQuery { text: String },
    /// Show a transient notification; it is not kept in state.
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

impl From<SubmissionResult> for Notification {
    fn from(result: SubmissionResult) -> Self {
        match result {
            SubmissionResult::Success { server_echo } => Notification::success(server_echo),
            SubmissionResult::Failure { message } => Notification::error(message),
        }
    }
}
