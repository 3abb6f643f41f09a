mod cli;
mod platform;

use std::process::ExitCode;

use clap::Parser;
use postings_logging::postings_error;

use cli::Cli;
use platform::app::Session;
use platform::persistence::{default_settings_path, load_settings};

fn main() -> ExitCode {
    let cli = Cli::parse();
    platform::logging::initialize(cli.log, platform::logging::level_for(cli.verbose));

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            postings_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let settings_path = cli.config.unwrap_or_else(default_settings_path);
    let mut settings = load_settings(&settings_path);
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    if let Some(theme) = cli.theme {
        settings.theme = theme;
    }

    let mut session = Session::new(settings, settings_path)?;
    match cli.command {
        Some(command) => session.run_once(command.into_msgs()),
        None => {
            session.run_interactive()?;
            Ok(true)
        }
    }
}
