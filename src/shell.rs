//! Interactive shell: a resume tab and a job tab over the same backend
//!
//! The shell only decides which form a command goes to. Each form keeps
//! its own state while the other tab is active.

use crate::api::Backend;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::forms::{FormStatus, JobsForm, ResumeForm};
use crate::output::{BusyIndicator, ResultRenderer};
use log::debug;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Resume,
    Job,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Resume => "Upload Resume",
            Tab::Job => "Add Job",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Resume => f.write_str("resume"),
            Tab::Job => f.write_str("job"),
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resume" => Ok(Tab::Resume),
            "job" | "jobs" => Ok(Tab::Job),
            other => Err(format!("Unknown tab: {} (use resume or job)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Tab(Tab),
    Select(PathBuf),
    Upload,
    Show,
    Status,
    Jobs,
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "" => Ok(ShellCommand::Empty),
        "tab" => rest.parse().map(ShellCommand::Tab),
        "select" if rest.is_empty() => Err("Usage: select <path>".to_string()),
        "select" => Ok(ShellCommand::Select(PathBuf::from(rest))),
        "upload" => Ok(ShellCommand::Upload),
        "show" => Ok(ShellCommand::Show),
        "status" => Ok(ShellCommand::Status),
        "jobs" => Ok(ShellCommand::Jobs),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command: {} (try help)", other)),
    }
}

const HELP: &str = "\
Commands:
  tab resume|job    switch between Upload Resume and Add Job
  select <path>     pick the file for the current tab
  upload            submit the current tab's file
  show              show the current tab's state
  status            check the backend
  jobs              list indexed jobs
  help              this message
  quit              leave the shell";

pub struct Shell<'a, B, I> {
    backend: &'a B,
    indicator: &'a I,
    renderer: ResultRenderer,
    tab: Tab,
    resume: ResumeForm,
    jobs: JobsForm,
}

impl<'a, B, I> Shell<'a, B, I>
where
    B: Backend,
    I: BusyIndicator,
{
    pub fn new(backend: &'a B, indicator: &'a I, renderer: ResultRenderer) -> Self {
        Self {
            backend,
            indicator,
            renderer,
            tab: Tab::default(),
            resume: ResumeForm::new(),
            jobs: JobsForm::new(),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn resume_form(&self) -> &ResumeForm {
        &self.resume
    }

    pub fn jobs_form(&self) -> &JobsForm {
        &self.jobs
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "SkillSync  [{}]  (type help)", self.tab.label())?;
        let mut lines = input.lines();

        loop {
            write!(out, "skillsync[{}]> ", self.tab)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            match parse_command(&line) {
                Ok(command) => {
                    if !self.execute(command, out).await? {
                        break;
                    }
                }
                Err(message) => writeln!(out, "{}", message)?,
            }
        }
        Ok(())
    }

    /// Run one command. Returns `false` when the shell should exit.
    pub async fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> Result<bool> {
        debug!("Shell command on {} tab: {:?}", self.tab, command);

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(false),
            ShellCommand::Tab(tab) => {
                self.tab = tab;
                writeln!(out, "Switched to {}", tab.label())?;
            }
            ShellCommand::Select(path) => {
                writeln!(out, "Selected {}", path.display())?;
                match self.tab {
                    Tab::Resume => self.resume.select_file(path),
                    Tab::Job => self.jobs.select_file(path),
                }
            }
            ShellCommand::Upload => {
                let status = match self.tab {
                    Tab::Resume => self.resume.submit(self.backend, self.indicator).await,
                    Tab::Job => self.jobs.submit(self.backend, self.indicator).await,
                };
                if status == FormStatus::Busy {
                    writeln!(out, "Uploading...")?;
                } else {
                    self.show(out)?;
                }
            }
            ShellCommand::Show => self.show(out)?,
            ShellCommand::Status => match self.backend.status().await {
                Ok(status) => writeln!(out, "{}", status.message)?,
                Err(e) => writeln!(out, "Backend unreachable: {}", e)?,
            },
            ShellCommand::Jobs => match self.backend.list_jobs().await {
                Ok(listing) => writeln!(out, "{}", self.renderer.render_listing(&listing, OutputFormat::Console)?)?,
                Err(e) => writeln!(out, "Could not list jobs: {}", e)?,
            },
        }
        Ok(true)
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        let (selected, loading, error) = match self.tab {
            Tab::Resume => (self.resume.selected(), self.resume.is_loading(), self.resume.error()),
            Tab::Job => (self.jobs.selected(), self.jobs.is_loading(), self.jobs.error()),
        };

        writeln!(
            out,
            "File: {}",
            selected.map(|p| p.display().to_string()).unwrap_or_else(|| "(none)".to_string())
        )?;
        if loading {
            writeln!(out, "Uploading...")?;
        }
        if let Some(error) = error {
            writeln!(out, "Error: {}", error)?;
        }

        match self.tab {
            Tab::Resume => {
                if let Some(result) = self.resume.result() {
                    writeln!(out, "{}", self.renderer.render_matches(result, OutputFormat::Console)?)?;
                }
            }
            Tab::Job => {
                if let Some(result) = self.jobs.result() {
                    writeln!(out, "Response:\n{}", self.renderer.render_value(result)?)?;
                }
            }
        }
        Ok(())
    }
}
