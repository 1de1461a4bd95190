//! Per-project outcomes, the aggregated execution report and its terminal rendering

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use anstyle::{Reset, Style};

use crate::projects::project::Project;
use crate::theme;

/// Why a project's command did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFailure {
    /// The shell ran and exited non-zero (`code` is `None` when killed by a signal)
    ExitStatus { code: Option<i32>, output: String },
    /// The shell could not be started, e.g. because the project path does not exist
    Spawn { message: String },
}

impl ProjectFailure {
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProjectFailure::ExitStatus { code, .. } => *code,
            ProjectFailure::Spawn { .. } => None,
        }
    }

    /// Text shown to the user: the captured output, or the spawn error.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            ProjectFailure::ExitStatus { output, .. } => output,
            ProjectFailure::Spawn { message } => message,
        }
    }
}

impl fmt::Display for ProjectFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl std::error::Error for ProjectFailure {}

/// Result of running the command in one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectOutcome {
    Succeeded {
        output: Vec<u8>,
    },
    /// `output` holds the raw bytes echoed to the user, `failure` the text kept for the summary
    Failed {
        output: Vec<u8>,
        failure: ProjectFailure,
    },
}

impl ProjectOutcome {
    /// Failed outcome for a shell that never started; the message doubles as its output.
    #[must_use]
    pub fn spawn_failure(message: String) -> Self {
        ProjectOutcome::Failed {
            output: message.clone().into_bytes(),
            failure: ProjectFailure::Spawn { message },
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ProjectOutcome::Succeeded { .. })
    }

    /// Combined output of the command exactly as produced, or the spawn error when it never ran
    #[must_use]
    pub fn output(&self) -> &[u8] {
        match self {
            ProjectOutcome::Succeeded { output } | ProjectOutcome::Failed { output, .. } => output,
        }
    }
}

/// Outcome of a full pass over the selected projects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    attempted: Vec<String>,
    failures: BTreeMap<String, ProjectFailure>,
}

impl ExecutionReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one project. Successful projects are only remembered as attempted.
    pub fn record(&mut self, key: &str, outcome: ProjectOutcome) {
        self.attempted.push(key.to_string());
        if let ProjectOutcome::Failed { failure, .. } = outcome {
            self.failures.insert(key.to_string(), failure);
        }
    }

    /// Keys of every project the command was run in, in execution order
    #[must_use]
    pub fn attempted(&self) -> &[String] {
        &self.attempted
    }

    #[must_use]
    pub fn failures(&self) -> &BTreeMap<String, ProjectFailure> {
        &self.failures
    }

    #[must_use]
    pub fn failure(&self, key: &str) -> Option<&ProjectFailure> {
        self.failures.get(key)
    }

    #[must_use]
    pub fn failed_names(&self) -> Vec<&str> {
        self.failures.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Process exit code for the run: 0 when every project passed, 1 otherwise
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_success())
    }

    /// One-line message listing the failed projects, `None` when everything passed.
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        Some(format!(
            "Projects [{}] encountered an error when running command.",
            self.failed_names().join(", ")
        ))
    }
}

/// Writes progress and the failure summary, optionally coloured
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
    width: usize,
}

impl Printer {
    #[must_use]
    pub fn new(color: bool, width: usize) -> Self {
        let width = if width == 0 { theme::FALLBACK_WIDTH } else { width };
        Self { color, width }
    }

    /// Colour when stdout is a terminal, separators as wide as the terminal.
    #[must_use]
    pub fn detect() -> Self {
        let width = crossterm::terminal::size()
            .map(|(columns, _)| usize::from(columns))
            .unwrap_or(theme::FALLBACK_WIDTH);
        Self::new(io::stdout().is_terminal(), width)
    }

    /// No colour, fixed width. Used for non-terminal output and tests.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(false, theme::FALLBACK_WIDTH)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            format!("{style}{text}{Reset}")
        } else {
            text.to_string()
        }
    }

    fn separator_line(&self) -> String {
        "-".repeat(self.width)
    }

    /// Announce the project about to run.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn header(&self, out: &mut impl Write, project: &Project, command: &str) -> io::Result<()> {
        let title = if project.display_name() == project.key {
            format!("Running command for project '{}'.", project.key)
        } else {
            format!(
                "Running command for project '{}' ({}).",
                project.key,
                project.display_name()
            )
        };
        writeln!(out, "{}", self.paint(theme::HEADER, &title))?;
        writeln!(
            out,
            "{}",
            self.paint(theme::HEADER, &format!("Command: {}", display_command(&project.path, command)))
        )
    }

    /// Echo captured command output, making sure it ends on a fresh line.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn output(&self, out: &mut impl Write, output: &[u8]) -> io::Result<()> {
        out.write_all(output)?;
        if !output.is_empty() && !output.ends_with(b"\n") {
            writeln!(out)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn separator(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.paint(theme::SEPARATOR, &self.separator_line()))
    }

    /// Print every failed project with its output. Prints nothing when all passed.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn summary(&self, out: &mut impl Write, report: &ExecutionReport) -> io::Result<()> {
        if report.is_success() {
            return Ok(());
        }
        let separator = self.paint(theme::FAILURE, &self.separator_line());
        writeln!(out, "{separator}")?;
        for (key, failure) in report.failures() {
            writeln!(
                out,
                "Encountered an error while running command in project '{key}'.\nError:"
            )?;
            let text = failure.text().trim_end_matches('\n');
            if !text.is_empty() {
                writeln!(out, "{}", self.paint(theme::FAILURE, text))?;
            }
            writeln!(out, "{separator}")?;
        }
        Ok(())
    }

    /// List projects without running anything.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn listing<'a>(
        &self,
        out: &mut impl Write,
        projects: impl IntoIterator<Item = &'a Project>,
    ) -> io::Result<()> {
        for project in projects {
            let tags = project
                .tags
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                out,
                "{} {} {}",
                project.key,
                self.paint(theme::DIM, &project.path.display().to_string()),
                self.paint(theme::DIM, &format!("[{tags}]"))
            )?;
        }
        Ok(())
    }
}

/// Shell-like rendering of what is executed, for the progress header
#[must_use]
pub fn display_command(path: &Path, command: &str) -> String {
    format!("sh -c {command:?} (in {})", path.display())
}
