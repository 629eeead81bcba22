//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, DomainResult};

/// Extension trait for converting `io::Result` with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.canonicalize(&root)
    ///     .with_path_context("resolve root", &root)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Turn an I/O error into a children producer failure.
    fn producer_context(self, action: &str, path: &Path) -> DomainResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn producer_context(self, action: &str, path: &Path) -> DomainResult<T> {
        self.map_err(|e| DomainError::producer(format!("{}: {}", action, path.display()), e))
    }
}
