use crate::encoder::encode_record;
use crate::form::{validate_record, ValidationError};
use crate::payload::{CsvPayload, InvalidFileError, SelectedFile};
use crate::DocumentRecord;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Document added successfully.";
pub const SUBMIT_SERVER_FALLBACK: &str = "Failed to process the document.";
pub const SUBMIT_TRANSPORT_MESSAGE: &str =
    "Could not reach the ingestion service. Please try again.";

/// One of the two ingestion paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionSource {
    Record(DocumentRecord),
    File(SelectedFile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOrigin {
    Form,
    File,
}

/// Body of a 2xx answer from the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionAck {
    pub server_echo: Option<String>,
}

/// Why a network call did not produce a usable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// Non-2xx response; `message` is what the JSON body reported, if anything.
    Server { status: u16, message: Option<String> },
    /// No response, or a response that could not be read. `cause` is for logs only.
    Transport { cause: String },
}

impl RequestFailure {
    /// The server-reported message, or `fallback` when there is none.
    pub fn user_message(&self, fallback: &str, transport: &str) -> String {
        match self {
            RequestFailure::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            RequestFailure::Server { .. } => fallback.to_string(),
            RequestFailure::Transport { .. } => transport.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success { server_echo: String },
    Failure { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejection {
    #[error("A submission is already in progress.")]
    Busy,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    InvalidFile(#[from] InvalidFileError),
}

/// Turns either ingestion path into one upload and tracks the busy guard.
///
/// At most one submission is in flight at a time; `finish` must be called
/// with the network outcome before another `submit` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionController {
    in_flight: Option<SubmissionOrigin>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<SubmissionOrigin> {
        self.in_flight
    }

    /// Validates and encodes `source`, then enters the submitting state.
    ///
    /// On `Err` nothing changed and no upload should be made.
    pub fn submit(&mut self, source: SubmissionSource) -> Result<CsvPayload, SubmitRejection> {
        if self.is_submitting() {
            return Err(SubmitRejection::Busy);
        }
        let (origin, payload) = match source {
            SubmissionSource::Record(record) => {
                validate_record(&record)?;
                (
                    SubmissionOrigin::Form,
                    CsvPayload::from_encoded(encode_record(&record)),
                )
            }
            SubmissionSource::File(file) => (SubmissionOrigin::File, CsvPayload::from_file(file)?),
        };
        self.in_flight = Some(origin);
        Ok(payload)
    }

    /// Leaves the submitting state and classifies the outcome.
    ///
    /// Returns `None` when nothing was in flight.
    pub fn finish(
        &mut self,
        outcome: Result<SubmissionAck, RequestFailure>,
    ) -> Option<(SubmissionOrigin, SubmissionResult)> {
        let origin = self.in_flight.take()?;
        let result = match outcome {
            Ok(ack) => SubmissionResult::Success {
                server_echo: ack
                    .server_echo
                    .filter(|echo| !echo.trim().is_empty())
                    .unwrap_or_else(|| SUBMIT_SUCCESS_MESSAGE.to_string()),
            },
            Err(failure) => SubmissionResult::Failure {
                message: failure.user_message(SUBMIT_SERVER_FALLBACK, SUBMIT_TRANSPORT_MESSAGE),
            },
        };
        Some((origin, result))
    }
}
