use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::{Customer, LineItem};

/// Lifecycle of an order.
///
/// `New → Processing → Completed`, with `Cancelled` reachable from `New` or
/// `Processing`. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    New,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether the dashboard may move an order from `self` to `next`.
    ///
    /// `Processing → Processing` is accepted: re-processing refreshes the
    /// timestamp and is still gated by verification.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        !self.is_terminal() && matches!(next, Processing | Completed | Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    /// Displayed as-is; not checked against the items.
    pub total: BigDecimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        customer: Customer,
        items: Vec<LineItem>,
        total: BigDecimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            customer,
            items,
            total,
            status: OrderStatus::New,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn with_status(mut self, status: OrderStatus, updated_at: DateTime<Utc>) -> Self {
        self.status = status;
        self.updated_at = updated_at;
        self
    }

    /// Sum of price × quantity over all items.
    pub fn computed_total(&self) -> BigDecimal {
        self.items
            .iter()
            .fold(BigDecimal::from(0), |acc, item| acc + item.line_total())
    }

    /// Number of physical units across all items.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
