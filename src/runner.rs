//! Sequential execution of one command across the selected projects

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command as ProcessCommand, ExitStatus};

use log::{debug, info};
use thiserror::Error;

use crate::projects::collection::ProjectCollection;
use crate::projects::project::Project;
use crate::report::{ExecutionReport, Printer, ProjectFailure, ProjectOutcome};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to write progress output: {0}")]
    Output(#[from] io::Error),
}

/// Build the shell invocation for `command`, run from `cwd`.
#[must_use]
pub fn shell_command(command: &str, cwd: &Path) -> ProcessCommand {
    let mut process = ProcessCommand::new("sh");
    process.arg("-c").arg(command).current_dir(cwd);
    process
}

/// Spawn `process` with stdout and stderr on one pipe and wait for it.
fn run_combined(mut process: ProcessCommand) -> io::Result<(ExitStatus, Vec<u8>)> {
    let (mut reader, writer) = io::pipe()?;
    process.stdout(writer.try_clone()?).stderr(writer);
    let spawned = process.spawn();
    // The command keeps the write ends open until dropped, reading would never hit EOF
    drop(process);
    let mut child = spawned?;

    let mut output = Vec::new();
    let read = reader.read_to_end(&mut output);
    let status = child.wait()?;
    read?;
    Ok((status, output))
}

/// Execute a single project's command, capturing combined stdout and stderr.
#[must_use]
pub fn execute_project(project: &Project, command: &str) -> ProjectOutcome {
    match run_combined(shell_command(command, &project.path)) {
        Ok((status, output)) if status.success() => ProjectOutcome::Succeeded { output },
        Ok((status, output)) => {
            debug!("Project '{}' exited with {status}", project.key);
            let failure = ProjectFailure::ExitStatus {
                code: status.code(),
                output: String::from_utf8_lossy(&output).into_owned(),
            };
            ProjectOutcome::Failed { output, failure }
        }
        Err(e) => {
            debug!("Unable to start command for project '{}': {e}", project.key);
            ProjectOutcome::spawn_failure(format!(
                "Unable to run command in {}: {e}",
                project.path.display()
            ))
        }
    }
}

/// Runs one command in every project, one after another
pub struct Runner<'a> {
    command: &'a str,
    printer: Printer,
}

impl<'a> Runner<'a> {
    #[must_use]
    pub fn new(command: &'a str, printer: Printer) -> Self {
        Self { command, printer }
    }

    /// Run the command in every project, in collection order, writing progress to `out`.
    ///
    /// Every project is attempted exactly once; a failing project never stops the run.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Output` if progress cannot be written to `out`.
    pub fn run(
        &self,
        projects: &ProjectCollection,
        out: &mut impl Write,
    ) -> Result<ExecutionReport, RunError> {
        let mut report = ExecutionReport::new();
        if projects.is_empty() {
            info!("No projects selected");
            return Ok(report);
        }

        for project in projects {
            info!(
                "Running `{}` in project '{}' ({})",
                self.command,
                project.key,
                project.path.display()
            );
            self.printer.header(out, project, self.command)?;
            out.flush()?;

            let outcome = execute_project(project, self.command);
            self.printer.output(out, outcome.output())?;
            self.printer.separator(out)?;
            out.flush()?;

            report.record(&project.key, outcome);
        }

        debug!(
            "Ran command in {} projects, {} failed",
            report.attempted().len(),
            report.failures().len()
        );
        Ok(report)
    }

    /// Print the failure summary for `report`.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Output` if the summary cannot be written to `out`.
    pub fn print_summary(
        &self,
        report: &ExecutionReport,
        out: &mut impl Write,
    ) -> Result<(), RunError> {
        self.printer.summary(out, report)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_project(key: &str, path: PathBuf) -> Project {
        Project {
            key: key.to_string(),
            path,
            ..Default::default()
        }
    }

    #[test]
    fn test_success_captures_output() {
        let dir = tempfile::tempdir().unwrap();
        let project = make_project("a", dir.path().to_path_buf());
        let outcome = execute_project(&project, "echo hello");
        assert_eq!(
            outcome,
            ProjectOutcome::Succeeded {
                output: b"hello\n".to_vec()
            }
        );
    }

    #[test]
    fn test_runs_in_project_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "inside").unwrap();
        let project = make_project("a", dir.path().to_path_buf());
        let outcome = execute_project(&project, "cat marker.txt");
        assert!(outcome.is_success());
        assert_eq!(outcome.output(), b"inside");
    }

    #[test]
    fn test_failure_captures_combined_output() {
        let dir = tempfile::tempdir().unwrap();
        let project = make_project("a", dir.path().to_path_buf());
        let outcome = execute_project(&project, "echo out; echo err >&2; exit 3");
        match outcome {
            ProjectOutcome::Failed {
                output,
                failure: ProjectFailure::ExitStatus { code, output: text },
            } => {
                assert_eq!(code, Some(3));
                assert_eq!(output, b"out\nerr\n");
                assert_eq!(text, "out\nerr\n");
            }
            other => panic!("Expected ExitStatus failure, got: {other:?}"),
        }
    }

    #[test]
    fn test_shell_syntax_is_supported() {
        let dir = tempfile::tempdir().unwrap();
        let project = make_project("a", dir.path().to_path_buf());
        let outcome = execute_project(&project, "printf 'a\\nb\\n' | wc -l | tr -d ' ' && true");
        assert_eq!(outcome.output(), b"2\n");
    }

    #[test]
    fn test_non_utf8_output_is_echoed_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let project = make_project("bin", dir.path().to_path_buf());
        let projects: ProjectCollection = [project.clone()].into_iter().collect();

        let outcome = execute_project(&project, "printf '\\377\\376'; exit 1");
        assert_eq!(outcome.output(), [0xffu8, 0xfe]);
        match &outcome {
            ProjectOutcome::Failed { failure, .. } => {
                assert_eq!(failure.text(), "\u{fffd}\u{fffd}");
            }
            other => panic!("Expected failure, got: {other:?}"),
        }

        let mut out = Vec::new();
        Runner::new("printf '\\377\\376'", Printer::plain())
            .run(&projects, &mut out)
            .unwrap();
        assert!(out.windows(3).any(|w| w == [0xff, 0xfe, b'\n']));
    }

    #[test]
    fn test_empty_path_is_spawn_failure() {
        let project = make_project("blank", PathBuf::new());
        match execute_project(&project, "true") {
            ProjectOutcome::Failed {
                failure: ProjectFailure::Spawn { .. },
                ..
            } => {}
            other => panic!("Expected Spawn failure, got: {other:?}"),
        }
    }

    #[test]
    fn test_missing_directory_is_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let project = make_project("gone", dir.path().join("does-not-exist"));
        match execute_project(&project, "true") {
            ProjectOutcome::Failed {
                failure: ProjectFailure::Spawn { message },
                ..
            } => {
                assert!(message.contains("does-not-exist"), "got: {message}");
            }
            other => panic!("Expected Spawn failure, got: {other:?}"),
        }
    }

    #[test]
    fn test_run_attempts_every_project() {
        let dir = tempfile::tempdir().unwrap();
        let projects: ProjectCollection = ["a", "b", "c"]
            .into_iter()
            .map(|key| {
                let path = dir.path().join(key);
                std::fs::create_dir(&path).unwrap();
                make_project(key, path)
            })
            .collect();
        std::fs::write(dir.path().join("a").join("fail"), "").unwrap();

        let mut out = Vec::new();
        let report = Runner::new("touch ran; test ! -e fail", Printer::plain())
            .run(&projects, &mut out)
            .unwrap();

        assert_eq!(report.attempted(), ["a", "b", "c"]);
        assert_eq!(report.failed_names(), vec!["a"]);
        for key in ["a", "b", "c"] {
            assert!(dir.path().join(key).join("ran").exists(), "{key} did not run");
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Running command for project 'c'."));
    }

    #[test]
    fn test_run_with_no_projects() {
        let mut out = Vec::new();
        let report = Runner::new("true", Printer::plain())
            .run(&ProjectCollection::new(), &mut out)
            .unwrap();
        assert!(report.is_success());
        assert!(report.attempted().is_empty());
        assert!(out.is_empty());
    }
}
