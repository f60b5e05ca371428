//! Child process runner

use super::{CommandOutcome, CommandRunner, Invocation};
use crate::error::DispatchError;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs invocations as child processes
///
/// By default the child inherits stdout/stderr so the tool's progress is
/// visible as it runs. With `capture` set, output is collected into the
/// [`CommandOutcome`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
    capture: bool,
}

impl ProcessRunner {
    pub fn new(capture: bool) -> Self {
        Self { capture }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutcome, DispatchError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        cmd.stdin(Stdio::null());

        debug!("Running: {}", invocation);

        let spawn_failed = |source| DispatchError::Spawn {
            program: invocation.program_name(),
            source,
        };

        let outcome = if self.capture {
            let output = cmd.output().map_err(spawn_failed)?;
            CommandOutcome {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
        } else {
            let status = cmd.status().map_err(spawn_failed)?;
            CommandOutcome {
                code: status.code(),
                ..CommandOutcome::default()
            }
        };

        debug!("{} exited with {:?}", invocation.program_name(), outcome.code);
        if !outcome.stdout.is_empty() {
            debug!("stdout:\n{}", outcome.stdout.trim_end());
        }
        if !outcome.stderr.is_empty() {
            debug!("stderr:\n{}", outcome.stderr.trim_end());
        }

        Ok(outcome)
    }
}
