use thiserror::Error;

/// Result type alias for permission sequencing operations.
pub type Result<T> = std::result::Result<T, SequenceError>;

/// Errors that can occur while sequencing a permission batch.
///
/// Denial is a normal outcome and never surfaces here; these cover only
/// misuse of the API and a host that disappeared mid-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A batch must contain at least one permission request.
    #[error("permission batch is empty")]
    EmptyBatch,

    /// The host (or its dialog presenter) has been dropped.
    #[error("permission host is no longer reachable")]
    HostGone,
}
