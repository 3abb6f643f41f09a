use std::path::PathBuf;

use postings_core::{DocumentField, Msg, SelectedFile};

pub const HELP: &str = "\
Commands:
  <text>                    search for <text>
  /set <field> <value>      set a form field (company_name, description, title,
                            location, skills_desc, url)
  /form                     show the form
  /submit                   add the form as a new posting
  /upload <path> [type]     upload a CSV file as-is
  /theme                    switch between dark and light
  /help                     show this help
  /quit                     leave";

/// One line typed in the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Messages for the core, in order.
    Dispatch(Vec<Msg>),
    ShowForm,
    ToggleTheme,
    Help,
    Quit,
    /// Blank input.
    Nothing,
    /// Not understood; the text says why.
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Dispatch(vec![Msg::QueryEdited(line.to_string()), Msg::SearchSubmitted]);
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };
    match name.to_ascii_lowercase().as_str() {
        "set" => parse_set(args),
        "form" => Command::ShowForm,
        "submit" => Command::Dispatch(vec![Msg::FormSubmitted]),
        "upload" => parse_upload(args),
        "theme" => Command::ToggleTheme,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("Unknown command `/{other}`. Type /help.")),
    }
}

fn parse_set(args: &str) -> Command {
    let (name, value) = match args.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (args, ""),
    };
    if name.is_empty() {
        return Command::Invalid("Usage: /set <field> <value>".to_string());
    }
    match name.parse::<DocumentField>() {
        Ok(field) => Command::Dispatch(vec![Msg::FieldEdited {
            field,
            value: value.to_string(),
        }]),
        Err(err) => Command::Invalid(err.to_string()),
    }
}

fn parse_upload(args: &str) -> Command {
    let (path, media_type) = match args.rsplit_once(char::is_whitespace) {
        Some((path, kind)) if kind.contains('/') => (path.trim(), Some(kind.to_string())),
        _ => (args, None),
    };
    if path.is_empty() {
        return Command::Invalid("Usage: /upload <path> [media type]".to_string());
    }
    let path = PathBuf::from(path.trim_matches('"'));
    Command::Dispatch(vec![Msg::FileSelected(SelectedFile::from_path(
        path, media_type,
    ))])
}
