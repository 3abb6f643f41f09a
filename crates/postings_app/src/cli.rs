use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use postings_core::{DocumentField, Msg, SelectedFile};

use crate::platform::ui::theme::Theme;

/// Search job postings and add new ones to the index.
#[derive(Debug, Parser)]
#[command(name = "postings", version)]
pub struct Cli {
    /// Settings file (RON). Defaults to `.postings.ron` in the working directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend origin, e.g. `http://localhost:8000`. Overrides the settings file.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Display theme for this run.
    #[arg(long, global = true, value_enum)]
    pub theme: Option<Theme>,

    /// Where log output goes.
    #[arg(long, global = true, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
    Off,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one search and print the ranked results.
    Search {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Add one job posting from its fields.
    Add(AddArgs),
    /// Upload a ready-made CSV file as-is.
    Upload {
        path: PathBuf,
        /// Media type to declare for the file (e.g. `text/csv`).
        #[arg(long)]
        media_type: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub company_name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub skills_desc: String,
    #[arg(long, default_value = "")]
    pub url: String,
}

impl Command {
    /// Messages that reproduce this command in the interactive session.
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            Command::Search { text } => {
                vec![Msg::QueryEdited(text.join(" ")), Msg::SearchSubmitted]
            }
            Command::Add(args) => {
                let mut msgs: Vec<Msg> = args
                    .into_values()
                    .into_iter()
                    .map(|(field, value)| Msg::FieldEdited { field, value })
                    .collect();
                msgs.push(Msg::FormSubmitted);
                msgs
            }
            Command::Upload { path, media_type } => {
                vec![Msg::FileSelected(SelectedFile::from_path(path, media_type))]
            }
        }
    }
}

impl AddArgs {
    fn into_values(self) -> [(DocumentField, String); 6] {
        [
            (DocumentField::CompanyName, self.company_name),
            (DocumentField::Description, self.description),
            (DocumentField::Title, self.title),
            (DocumentField::Location, self.location),
            (DocumentField::SkillsDesc, self.skills_desc),
            (DocumentField::Url, self.url),
        ]
    }
}
