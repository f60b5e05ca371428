//! netparams - Apply the best network calibration result
//!
//! A network calibration run leaves behind one parameter file per iteration,
//! each named after the error it achieved (`it*_mae_<x>_rmse_<y>.json`).
//! netparams scans result directories for those files, picks the one with the
//! lowest error, and hands it to the external `ApplyNetworkParams` tool which
//! writes the calibrated network next to the result directory.
//!
//! # Architecture
//!
//! - **config**: CLI surface, TOML config files, validation, resolved run configuration
//! - **resolve**: Glob resolution of the jar, network and features inputs
//! - **selection**: Candidate discovery, filename grammar, best-result selection
//! - **dispatch**: External command abstraction and the `freespeed` invocation
//! - **pipeline**: Per-directory processing and the run loop
//! - **output**: Console progress and the JSON run report

pub mod config;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod resolve;
pub mod selection;

// Re-export commonly used types
pub use config::RunConfig;
pub use dispatch::{CommandOutcome, CommandRunner, Invocation};
pub use error::{DispatchError, ResolveError, SelectError};
pub use selection::ResultRecord;

/// Result type used throughout netparams
pub type Result<T> = anyhow::Result<T>;
