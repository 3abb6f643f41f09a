use crossterm::style::Stylize;
use postings_core::{AppViewModel, Notification, NotificationKind, ResultRow};

use super::theme::Theme;

/// Turns view-model changes into terminal lines.
///
/// The terminal is append-only, so only transitions are printed: a new search
/// starting, the applied rows or error changing, an upload starting.
pub struct Renderer {
    theme: Theme,
    last: AppViewModel,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            last: AppViewModel::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn frame(&mut self, view: &AppViewModel) -> Vec<String> {
        let palette = self.theme.palette();
        let mut lines = Vec::new();

        let new_query = view.last_query != self.last.last_query;
        if view.searching && (new_query || !self.last.searching) {
            let query = view.last_query.as_deref().unwrap_or_default();
            lines.push(format!("Searching for \"{query}\"…").with(palette.muted).to_string());
        }
        // Every applied answer is shown, including late ones from overlapping searches.
        let settled = !view.searching
            && (self.last.searching
                || view.results != self.last.results
                || view.error != self.last.error);
        if settled {
            lines.extend(self.results(view));
        }
        if view.submitting && !self.last.submitting {
            lines.push("Uploading document…".with(palette.muted).to_string());
        }

        self.last = view.clone();
        lines
    }

    pub fn results(&self, view: &AppViewModel) -> Vec<String> {
        let palette = self.theme.palette();
        if let Some(error) = &view.error {
            return vec![error.as_str().with(palette.error).to_string()];
        }
        if view.results.is_empty() {
            return vec!["No results.".with(palette.muted).to_string()];
        }
        let mut lines = Vec::with_capacity(view.results.len() * 3);
        for (rank, row) in view.results.iter().enumerate() {
            lines.extend(self.result_row(rank + 1, row));
        }
        lines
    }

    fn result_row(&self, rank: usize, row: &ResultRow) -> Vec<String> {
        let palette = self.theme.palette();
        let mut lines = vec![format!(
            "{:>3}. {}",
            rank,
            row.title.as_str().with(palette.title).bold()
        )];
        if !row.excerpt.is_empty() {
            lines.push(format!("     {}", row.excerpt.as_str().with(palette.excerpt)));
        }
        if let Some(link) = &row.link {
            lines.push(format!(
                "     {} {}",
                link.label.as_str().with(palette.link).underlined(),
                format!("<{}>", link.href).with(palette.muted)
            ));
        }
        lines
    }

    pub fn form(&self, view: &AppViewModel) -> Vec<String> {
        let palette = self.theme.palette();
        let mut lines = vec!["Add New Document".with(palette.heading).bold().to_string()];
        for field in &view.form {
            let value = if field.value.is_empty() {
                "(empty)".with(palette.muted).to_string()
            } else {
                field.value.replace('\n', "\\n")
            };
            lines.push(format!("  {:<20} {}", field.label, value));
        }
        if view.submitting {
            lines.push("  (submission in progress)".with(palette.muted).to_string());
        }
        lines
    }

    pub fn notification(&self, notification: &Notification, timestamp: &str) -> String {
        let palette = self.theme.palette();
        let color = match notification.kind {
            NotificationKind::Success => palette.success,
            NotificationKind::Error => palette.error,
        };
        format!(
            "[{}] {} {}",
            timestamp,
            notification.title.as_str().with(color).bold(),
            notification.message
        )
    }
}
