use crate::view_model::{AppViewModel, FormFieldView};
use crate::{result_rows, DocumentField, FormState, QueryController, SubmissionController};

/// Whole client state: the form, both controllers and the render flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) form: FormState,
    pub(crate) submission: SubmissionController,
    pub(crate) query: QueryController,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn submission(&self) -> &SubmissionController {
        &self.submission
    }

    pub fn query(&self) -> &QueryController {
        &self.query
    }

    /// No upload and no search outstanding.
    pub fn is_idle(&self) -> bool {
        !self.submission.is_submitting() && !self.query.is_searching()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            form: DocumentField::ALL
                .into_iter()
                .map(|field| FormFieldView {
                    field,
                    label: field.label(),
                    value: self.form.value(field).to_string(),
                })
                .collect(),
            form_dirty: self.form.is_dirty(),
            submitting: self.submission.is_submitting(),
            query_text: self.query.text().to_string(),
            last_query: self.query.last_query().map(str::to_string),
            searching: self.query.is_searching(),
            error: self.query.error().map(str::to_string),
            results: result_rows(self.query.results()),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
