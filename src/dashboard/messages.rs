use tokio::sync::oneshot;

use super::{DashboardError, DashboardSnapshot, Fetch, Notice};
use crate::domain::Order;
use crate::verification::{Phase, UnitKey};

pub type DashboardResponse<T> = oneshot::Sender<Result<T, DashboardError>>;

/// Requests the dashboard actor accepts from its client.
#[derive(Debug)]
pub enum DashboardRequest {
    LoadOrders {
        respond_to: DashboardResponse<Fetch<Vec<Order>>>,
    },
    SelectOrder {
        id: String,
        respond_to: DashboardResponse<Fetch<Order>>,
    },
    OpenVerification {
        respond_to: DashboardResponse<usize>,
    },
    CloseVerification {
        respond_to: DashboardResponse<()>,
    },
    SetScannedValue {
        key: UnitKey,
        value: String,
        respond_to: DashboardResponse<()>,
    },
    Verify {
        key: UnitKey,
        respond_to: DashboardResponse<Phase>,
    },
    RequestCancel {
        key: UnitKey,
        respond_to: DashboardResponse<()>,
    },
    ConfirmCancel {
        key: UnitKey,
        respond_to: DashboardResponse<()>,
    },
    DismissCancel {
        respond_to: DashboardResponse<Option<UnitKey>>,
    },
    VerificationReady {
        respond_to: DashboardResponse<bool>,
    },
    ConfirmAndProcess {
        respond_to: DashboardResponse<Order>,
    },
    CompleteOrder {
        respond_to: DashboardResponse<Order>,
    },
    CancelOrder {
        respond_to: DashboardResponse<Order>,
    },
    Snapshot {
        respond_to: DashboardResponse<DashboardSnapshot>,
    },
    TakeNotices {
        respond_to: DashboardResponse<Vec<Notice>>,
    },
    Shutdown,
}
