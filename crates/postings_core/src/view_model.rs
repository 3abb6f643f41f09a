use crate::{DocumentField, ResultRow};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub form: Vec<FormFieldView>,
    pub form_dirty: bool,
    pub submitting: bool,
    pub query_text: String,
    pub last_query: Option<String>,
    pub searching: bool,
    pub error: Option<String>,
    pub results: Vec<ResultRow>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub field: DocumentField,
    pub label: &'static str,
    pub value: String,
}
