//! Error taxonomy for the classify → append → evaluate chain.

use thiserror::Error;

/// Failures the core can surface to callers.
///
/// Every failure in the submission chain aborts the remainder of that
/// chain; there is no partial response.
#[derive(Debug, Error)]
pub enum MoodError {
    /// Classifier unreachable or returned malformed output.
    /// The entry was NOT appended to the store.
    #[error("classification failed: {0}")]
    Classification(String),

    /// Store append or range query failed. Callers must not assume the
    /// event was recorded.
    #[error("store operation failed: {0}")]
    Store(String),

    /// Invalid threshold/window/policy values. Fatal at startup.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, MoodError>;
