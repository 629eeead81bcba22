//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::InvalidCriteria { .. } => crate::exitcode::USAGE,
                ApplicationError::InvalidRoot(_) => crate::exitcode::NOINPUT,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                ApplicationError::Domain(d) => match d.root_cause() {
                    DomainError::Producer { .. } => crate::exitcode::IOERR,
                    _ => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        let invalid = CliError::from(ApplicationError::invalid_criteria("x", "bad"));
        assert_eq!(invalid.exit_code(), crate::exitcode::USAGE);

        let missing = CliError::from(ApplicationError::InvalidRoot(PathBuf::from("/nope")));
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);

        let nil = CliError::from(ApplicationError::from(DomainError::nil_parameter("node")));
        assert_eq!(nil.exit_code(), crate::exitcode::SOFTWARE);
    }
}
