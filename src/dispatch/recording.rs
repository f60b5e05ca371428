//! Recording command runner
//!
//! Records every invocation without spawning anything and answers with a
//! configurable exit code. Lets tests and library callers inspect what would
//! have been run.
//!
//! # Example
//!
//! ```
//! use netparams::dispatch::{CommandRunner, Invocation};
//! use netparams::dispatch::recording::RecordingRunner;
//!
//! let runner = RecordingRunner::new();
//! let outcome = runner.run(&Invocation::new("java").arg("-version")).unwrap();
//! assert!(outcome.success());
//! assert_eq!(runner.invocations().len(), 1);
//! ```

use super::{CommandOutcome, CommandRunner, Invocation};
use crate::error::DispatchError;
use std::sync::{Arc, Mutex};

/// Command runner that records invocations instead of executing them
#[derive(Debug, Clone)]
pub struct RecordingRunner {
    /// Exit code reported for every invocation
    exit_code: i32,

    /// All invocations in call order
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl RecordingRunner {
    /// Create a runner that reports success
    pub fn new() -> Self {
        Self::with_exit_code(0)
    }

    /// Create a runner that reports `exit_code` for every invocation
    pub fn with_exit_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Invocations recorded so far
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutcome, DispatchError> {
        if let Ok(mut invocations) = self.invocations.lock() {
            invocations.push(invocation.clone());
        }
        Ok(CommandOutcome::exited(self.exit_code))
    }
}
