use crate::domain::Order;
use crate::verification::{UnitKey, UnitState, WorkflowSummary};

/// Outcome of a fetch the dashboard issued on the caller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    /// The result arrived while still current and was applied.
    Applied(T),
    NotFound,
    /// A newer request superseded this one; its result was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-visible message the renderer should surface (toast, banner...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationView {
    pub order_id: String,
    pub units: Vec<(UnitKey, UnitState)>,
    pub summary: WorkflowSummary,
    pub pending_cancel: Option<UnitKey>,
    pub ready: bool,
}

/// Read-only copy of everything the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub orders: Vec<Order>,
    pub selected_id: Option<String>,
    pub selected: Option<Order>,
    pub loading_orders: bool,
    pub loading_detail: bool,
    pub updating_status: bool,
    pub verification: Option<VerificationView>,
}

impl DashboardSnapshot {
    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }
}
