//! Postings core: pure document-intake and query state machine.
mod effect;
mod encoder;
mod form;
mod msg;
mod payload;
mod query;
mod record;
mod results;
mod state;
mod submission;
mod update;
mod view_model;

pub use effect::{Effect, Notification, NotificationKind};
pub use encoder::{encode_fields, encode_record, CSV_MEDIA_TYPE};
pub use form::{validate_record, FormState, ValidationError, VALIDATION_MESSAGE};
pub use msg::Msg;
pub use payload::{CsvPayload, InvalidFileError, PayloadSource, SelectedFile, FORM_PAYLOAD_FILENAME};
pub use query::{QueryController, SearchRejection, SEARCH_SERVER_FALLBACK, SEARCH_TRANSPORT_MESSAGE};
pub use record::{DocumentField, DocumentRecord, UnknownField};
pub use results::{result_row, result_rows, RankedResult, ResultLink, ResultRow};
pub use state::AppState;
pub use submission::{
    RequestFailure, SubmissionAck, SubmissionController, SubmissionOrigin, SubmissionResult,
    SubmissionSource, SubmitRejection, SUBMIT_SERVER_FALLBACK, SUBMIT_SUCCESS_MESSAGE,
    SUBMIT_TRANSPORT_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, FormFieldView};
