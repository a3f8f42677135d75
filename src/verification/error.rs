use thiserror::Error;

/// Reasons a verification operation is refused. A refused operation never
/// changes workflow state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("No verification is open")]
    NotOpen,
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
    #[error("Line item id appears more than once: {0}")]
    DuplicateLineItem(String),
    #[error("Nothing scanned for unit {0}")]
    EmptyScan(String),
    #[error("Unit {0} is already verified")]
    AlreadyVerified(String),
    #[error("Unit {0} is cancelled")]
    AlreadyCancelled(String),
    #[error("Unit {0} is being verified")]
    VerificationInFlight(String),
    #[error("No cancellation was requested for unit {0}")]
    NoCancelRequested(String),
    #[error("Verification result for unit {0} arrived after the workflow changed")]
    Stale(String),
    #[error("{outstanding} unit(s) still need verification")]
    NotReady { outstanding: usize },
}
