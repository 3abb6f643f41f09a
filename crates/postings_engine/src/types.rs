use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadBody {
    Bytes(Vec<u8>),
    /// Read once, when the upload runs.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub filename: String,
    pub media_type: String,
    pub body: UploadBody,
}

/// Acknowledgement from the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadAck {
    /// The `message` field of the JSON body, when it is a string.
    pub message: Option<String>,
}

/// One entry of `ranked_results` as the backend sends it.
///
/// Both the ranking service shape (`doc_id`, `title`, `url`) and the richer
/// fixture shape (`id`, `description`, `displayUrl`) are accepted. Rows arrive
/// already ranked, so `score` and other unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct WireRankedResult {
    #[serde(default, alias = "doc_id")]
    pub id: Option<WireId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "displayUrl", alias = "display_url")]
    pub display_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{n}"),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    UploadCompleted {
        filename: String,
        result: Result<UploadAck, ApiError>,
    },
    SearchCompleted {
        query: String,
        result: Result<Vec<WireRankedResult>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// True when no usable server answer exists (network, timeout, decode, file read).
    pub fn is_transport(&self) -> bool {
        !matches!(self.kind, FailureKind::Server { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidRequest,
    /// Non-2xx answer; `reported` is the message found in the JSON body.
    Server { status: u16, reported: Option<String> },
    Timeout,
    Network,
    Decode,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Server { status, .. } => write!(f, "http status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::Io => write!(f, "file read error"),
        }
    }
}
