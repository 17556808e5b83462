//! CLI exit code handling.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Request rejected (bad input, nothing was computed)
//! - 2: Any other failure

use std::process::ExitCode;

use convo_cluster_core::{ClusteringError, InputError};

/// Exit codes for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    /// Success
    Success = 0,
    /// The request failed input validation
    Rejected = 1,
    /// I/O, parse, configuration or internal failure
    Failure = 2,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

impl From<&ClusteringError> for CliExitCode {
    fn from(err: &ClusteringError) -> Self {
        if err.is_input_rejection() {
            CliExitCode::Rejected
        } else {
            CliExitCode::Failure
        }
    }
}

/// Determine the exit code for an error chain.
///
/// Walks the chain looking for a typed core error, so context added with
/// `anyhow` does not hide an input rejection.
pub fn exit_code_for_error(err: &anyhow::Error) -> CliExitCode {
    for cause in err.chain() {
        if let Some(clustering) = cause.downcast_ref::<ClusteringError>() {
            return CliExitCode::from(clustering);
        }
        if cause.downcast_ref::<InputError>().is_some() {
            return CliExitCode::Rejected;
        }
    }
    CliExitCode::Failure
}
