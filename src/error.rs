//! Error types for lipformant.
//!
//! The per-frame analysis never fails: degenerate input only degrades the
//! numbers it produces. Errors exist for the configuration-time entry points
//! (building an analyzer, validating parameters, wrapping a sound), where a
//! bad value is cheaper to reject once than to guard against on every frame.

use thiserror::Error;

/// Result type alias using lipformant's Error type.
///
/// # Example
///
/// ```
/// use lipformant::{FormantAnalyzer, Result};
///
/// fn session(frame_len: usize) -> Result<FormantAnalyzer> {
///     FormantAnalyzer::new(frame_len, 32)
/// }
///
/// assert!(session(512).is_ok());
/// assert!(session(16).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring an analysis session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid parameter value.
    ///
    /// Returned when a constructor or validator receives a value outside
    /// the range the analysis can work with. The string describes which
    /// value was rejected and why.
    ///
    /// # Examples of invalid parameters
    ///
    /// - Frame length shorter than 3 samples
    /// - LPC order of zero, or not below the frame length
    /// - Zero, negative or non-finite sample rate
    /// - Negative volume threshold
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A buffer does not have the length the session was configured for.
    ///
    /// The input frame and the three spectral-state curves must all share
    /// the frame length `N`.
    #[error("Length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch {
        /// Length the session was configured for.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}
