use thiserror::Error;

use crate::order_actor::OrderError;
use crate::verification::VerificationError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DashboardError {
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
