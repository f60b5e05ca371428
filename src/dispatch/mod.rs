//! External command dispatch
//!
//! The network parameters are applied by MATSim's `ApplyNetworkParams`
//! application, run as a separate java process. This module builds that
//! invocation and runs it through the [`CommandRunner`] trait, which returns
//! a typed [`CommandOutcome`] instead of discarding the exit status.
//!
//! Implementations:
//!
//! - [`process::ProcessRunner`]: spawns a real child process
//! - [`recording::RecordingRunner`]: records invocations without spawning

pub mod process;
pub mod recording;

use crate::config::RunConfig;
use crate::error::DispatchError;
use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Fully qualified class of the MATSim application applying network params
pub const APPLY_NETWORK_PARAMS_CLASS: &str =
    "org.matsim.application.prepare.network.params.ApplyNetworkParams";

/// Sub-command of `ApplyNetworkParams` adjusting free speeds
pub const FREESPEED_SUBCOMMAND: &str = "freespeed";

/// Clamp range for the speed factors computed by the model
pub const FACTOR_BOUNDS: &str = "-5,1";

/// An external program with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Create an invocation without arguments
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append an option followed by its value
    pub fn opt(self, name: &str, value: impl AsRef<OsStr>) -> Self {
        self.arg(name).arg(value)
    }

    /// Program name for messages
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Arguments as lossy UTF-8 strings
    pub fn args_lossy(&self) -> Vec<String> {
        self.args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Single-quote a word that is empty or contains whitespace or quotes
fn shell_quote(word: &OsStr) -> String {
    let word = word.to_string_lossy();
    let plain = !word.is_empty()
        && !word.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"');
    if plain {
        return word.into_owned();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}

/// Result of running an external command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// Exit code, `None` if the process was terminated by a signal
    pub code: Option<i32>,
    /// Captured stdout (empty unless output is captured)
    pub stdout: String,
    /// Captured stderr (empty unless output is captured)
    pub stderr: String,
}

impl CommandOutcome {
    /// Outcome of a process that exited with `code` and printed nothing
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands
///
/// Blocks until the command exits. Implementations only fail when the command
/// cannot be run at all; a non-zero exit is reported through the outcome.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutcome, DispatchError>;
}

/// Build the `ApplyNetworkParams freespeed` invocation for one result file
pub fn freespeed_invocation(config: &RunConfig, params: &Path, output: &Path) -> Invocation {
    Invocation::new(&config.java)
        .opt("-cp", &config.jar)
        .arg(APPLY_NETWORK_PARAMS_CLASS)
        .arg(FREESPEED_SUBCOMMAND)
        .opt("--network", &config.network)
        .opt("--input-features", &config.features)
        .opt("--model", &config.model)
        .opt("--factor-bounds", FACTOR_BOUNDS)
        .opt("--input-params", params)
        .opt("--output", output)
}

/// Decide what a finished command means for the run
///
/// A failed command is an error only in strict mode; otherwise it is logged
/// and the run carries on.
pub fn check_outcome(
    invocation: &Invocation,
    outcome: &CommandOutcome,
    strict: bool,
) -> Result<(), DispatchError> {
    if outcome.success() {
        return Ok(());
    }

    if !outcome.stderr.is_empty() {
        eprintln!("{}", outcome.stderr.trim_end());
    }

    let err = DispatchError::NonZeroExit {
        program: invocation.program_name(),
        code: outcome.code,
    };
    if strict {
        return Err(err);
    }

    warn!("{} (ignored, use --strict to fail)", err);
    Ok(())
}
