//! Closed error set for notebook operations.
//!
//! Every failure a caller can observe is one of these variants, produced at
//! the adapter boundary. Nothing is ever inferred from free-text messages:
//! the document store classifies I/O failures by raw OS error code, and the
//! pure roster functions never construct errors at all (they return verdict
//! values instead).

use thiserror::Error;

/// Raw OS error for "no space left on device".
const ENOSPC: i32 = 28;

#[derive(Debug, Error)]
pub enum NotebookError {
    /// An in-flight read was aborted. Read paths treat this as a benign
    /// no-op; it is never surfaced to the user.
    #[error("request cancelled")]
    Cancelled,

    /// The backing store refused a write for lack of space.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// A guarded operation was rejected. The reason is human-readable and
    /// shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    /// Anything the variants above do not cover. Surfaced to users as a
    /// generic "please try again" message.
    #[error("storage failure: {0}")]
    Store(String),
}

impl NotebookError {
    pub fn validation(reason: impl Into<String>) -> Self {
        NotebookError::Validation(reason.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        NotebookError::NotFound(what.into())
    }
}

impl From<std::io::Error> for NotebookError {
    fn from(err: std::io::Error) -> Self {
        match err.raw_os_error() {
            Some(code) if code == ENOSPC => NotebookError::QuotaExceeded,
            _ => NotebookError::Store(err.to_string()),
        }
    }
}

impl From<serde_yaml::Error> for NotebookError {
    fn from(err: serde_yaml::Error) -> Self {
        NotebookError::Store(format!("malformed document: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, NotebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enospc_maps_to_quota_exceeded() {
        let err = std::io::Error::from_raw_os_error(ENOSPC);
        assert!(matches!(NotebookError::from(err), NotebookError::QuotaExceeded));
    }

    #[test]
    fn other_io_errors_map_to_store() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(NotebookError::from(err), NotebookError::Store(_)));
    }

    #[test]
    fn validation_displays_reason_verbatim() {
        let err = NotebookError::validation("Lupe is the primary contact.");
        assert_eq!(err.to_string(), "Lupe is the primary contact.");
    }
}
