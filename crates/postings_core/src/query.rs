use crate::submission::RequestFailure;
use crate::RankedResult;

pub const SEARCH_SERVER_FALLBACK: &str = "An error occurred while searching.";
pub const SEARCH_TRANSPORT_MESSAGE: &str = "Could not reach the search service. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchRejection {
    #[error("Enter a search query first.")]
    EmptyQuery,
}

/// Search-box text, the latest ranked results and the request status.
///
/// Overlapping searches are not fenced: whichever response is applied last
/// replaces the results, and any completion clears `searching`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryController {
    text: String,
    last_query: Option<String>,
    results: Vec<RankedResult>,
    searching: bool,
    error: Option<String>,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn results(&self) -> &[RankedResult] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starts a search for `text` and returns the trimmed query to send.
    ///
    /// Blank text is rejected without touching any state.
    pub fn search(&mut self, text: &str) -> Result<String, SearchRejection> {
        let query = text.trim();
        if query.is_empty() {
            return Err(SearchRejection::EmptyQuery);
        }
        self.searching = true;
        self.error = None;
        self.results.clear();
        self.last_query = Some(query.to_string());
        Ok(query.to_string())
    }

    /// Searches for the current search-box text.
    pub fn search_current(&mut self) -> Result<String, SearchRejection> {
        let text = self.text.clone();
        self.search(&text)
    }

    /// Applies a response. Results are replaced wholesale, never merged.
    pub fn finish(&mut self, outcome: Result<Vec<RankedResult>, RequestFailure>) {
        self.searching = false;
        match outcome {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(failure) => {
                self.results.clear();
                self.error = Some(
                    failure.user_message(SEARCH_SERVER_FALLBACK, SEARCH_TRANSPORT_MESSAGE),
                );
            }
        }
    }
}
