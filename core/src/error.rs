//! Verification error type.
//!
//! A failed verification carries a [`FailureReport`]. The variant records
//! which boundary failed, so callers can tell input from output failures
//! without parsing the message.

use thiserror::Error;

use crate::processor::Direction;
use crate::report::FailureReport;

/// A value did not conform to its schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerificationError {
    /// Verification failed outside of a directional facade.
    #[error("{0}")]
    Failed(FailureReport),
    /// Input verification failed.
    #[error("{0}")]
    Input(FailureReport),
    /// Output verification failed.
    #[error("{0}")]
    Output(FailureReport),
}

impl VerificationError {
    /// The structured failure for programmatic inspection.
    pub fn report(&self) -> &FailureReport {
        match self {
            VerificationError::Failed(report)
            | VerificationError::Input(report)
            | VerificationError::Output(report) => report,
        }
    }

    pub fn into_report(self) -> FailureReport {
        match self {
            VerificationError::Failed(report)
            | VerificationError::Input(report)
            | VerificationError::Output(report) => report,
        }
    }

    /// Re-tags the failure with the boundary it occurred at.
    pub fn into_direction(self, direction: Direction) -> Self {
        let report = self.into_report();
        match direction {
            Direction::Input => VerificationError::Input(report),
            Direction::Output => VerificationError::Output(report),
        }
    }

    /// The boundary, if one was recorded.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            VerificationError::Failed(_) => None,
            VerificationError::Input(_) => Some(Direction::Input),
            VerificationError::Output(_) => Some(Direction::Output),
        }
    }
}

/// Convenience alias for verification results.
pub type Result<T> = std::result::Result<T, VerificationError>;
