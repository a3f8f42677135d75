use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::OrderStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Order must pass product verification before processing")]
    VerificationRequired,
    #[error("No order selected")]
    NoOrderSelected,
    #[error("Order details are still loading")]
    DetailLoading,
    #[error("A status update is already in progress")]
    UpdateInFlight,
    #[error("Order repository error: {0}")]
    Repository(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::Rejected(msg) => OrderError::Repository(msg),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
