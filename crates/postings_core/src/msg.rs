use crate::{DocumentField, RankedResult, RequestFailure, SelectedFile, SubmissionAck};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User changed one form field.
    FieldEdited { field: DocumentField, value: String },
    /// User submitted the document form.
    FormSubmitted,
    /// User picked a file to upload as-is.
    FileSelected(SelectedFile),
    /// The ingestion endpoint answered, or could not be reached.
    SubmissionFinished(Result<SubmissionAck, RequestFailure>),
    /// User edited the search box.
    QueryEdited(String),
    /// User submitted the search box.
    SearchSubmitted,
    /// The query endpoint answered, or could not be reached.
    SearchFinished(Result<Vec<RankedResult>, RequestFailure>),
}
