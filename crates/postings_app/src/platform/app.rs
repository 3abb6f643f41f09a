use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use postings_core::{update, AppState, Msg, Notification, NotificationKind};
use postings_logging::{postings_debug, postings_error, postings_info};

use super::effects::EffectRunner;
use super::persistence::{save_settings, Settings};
use super::ui::commands::{parse_line, Command, HELP};
use super::ui::render::Renderer;

const INPUT_POLL: Duration = Duration::from_millis(20);
const ENGINE_POLL: Duration = Duration::from_millis(100);

/// One client session: the core state plus everything that talks to the
/// outside world on its behalf.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer,
    settings: Settings,
    settings_path: PathBuf,
    failed: bool,
}

impl Session {
    pub fn new(settings: Settings, settings_path: PathBuf) -> anyhow::Result<Self> {
        let runner = EffectRunner::new(&settings).context("starting the request engine")?;
        Ok(Self {
            state: AppState::new(),
            runner,
            renderer: Renderer::new(settings.theme),
            settings,
            settings_path,
            failed: false,
        })
    }

    /// Dispatches `msgs` in order, then waits for every request they started.
    ///
    /// Returns false when any step reported an error to the user.
    pub fn run_once(&mut self, msgs: Vec<Msg>) -> anyhow::Result<bool> {
        for msg in msgs {
            self.dispatch(msg)?;
        }
        while !self.state.is_idle() {
            if let Some(msg) = self
                .runner
                .next_msg(ENGINE_POLL)
                .context("waiting for a response")?
            {
                self.dispatch(msg)?;
            }
        }
        Ok(!self.failed)
    }

    pub fn run_interactive(&mut self) -> anyhow::Result<()> {
        let input = spawn_stdin_reader();
        self.print(&["Type a search, or /help for commands.".to_string()])?;

        loop {
            while let Some(msg) = self
                .runner
                .try_next_msg()
                .context("waiting for a response")?
            {
                self.dispatch(msg)?;
            }

            let line = match input.recv_timeout(INPUT_POLL) {
                Ok(line) => line,
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            };

            match parse_line(&line) {
                Command::Dispatch(msgs) => {
                    for msg in msgs {
                        self.dispatch(msg)?;
                    }
                }
                Command::ShowForm => {
                    let lines = self.renderer.form(&self.state.view());
                    self.print(&lines)?;
                }
                Command::ToggleTheme => self.toggle_theme()?,
                Command::Help => self.print(&[HELP.to_string()])?,
                Command::Quit => break,
                Command::Nothing => {}
                Command::Invalid(message) => self.print(&[message])?,
            }
        }

        if !self.state.is_idle() {
            postings_info!("Leaving with a request still in flight");
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        postings_debug!("dispatch {}", msg_name(&msg));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);

        if state.consume_dirty() {
            let view = state.view();
            if view.error.is_some() && !view.searching {
                self.failed = true;
            }
            let lines = self.renderer.frame(&view);
            self.state = state;
            self.print(&lines)?;
        } else {
            self.state = state;
        }

        let notifications = self.runner.run(effects);
        for notification in &notifications {
            self.notify(notification)?;
        }
        Ok(())
    }

    fn notify(&mut self, notification: &Notification) -> anyhow::Result<()> {
        if notification.kind == NotificationKind::Error {
            self.failed = true;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let line = self.renderer.notification(notification, &timestamp);
        self.print(&[line])
    }

    fn toggle_theme(&mut self) -> anyhow::Result<()> {
        let theme = self.renderer.theme().toggled();
        self.renderer.set_theme(theme);
        self.settings.theme = theme;
        save_settings(&self.settings_path, &self.settings);
        postings_info!("Theme set to {:?}", self.settings.theme);
        self.print(&[format!("Theme: {:?}", self.settings.theme)])
    }

    fn print(&self, lines: &[String]) -> anyhow::Result<()> {
        if lines.is_empty() {
            return Ok(());
        }
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .map(|_| ())
        .unwrap_or_else(|err| postings_error!("stdin reader: {}", err));
    rx
}

/// Message variant without its payload; form values stay out of the log.
fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::FieldEdited { .. } => "FieldEdited",
        Msg::FormSubmitted => "FormSubmitted",
        Msg::FileSelected(_) => "FileSelected",
        Msg::SubmissionFinished(_) => "SubmissionFinished",
        Msg::QueryEdited(_) => "QueryEdited",
        Msg::SearchSubmitted => "SearchSubmitted",
        Msg::SearchFinished(_) => "SearchFinished",
    }
}
