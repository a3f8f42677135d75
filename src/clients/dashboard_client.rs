use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::dashboard::messages::DashboardRequest;
use crate::dashboard::{DashboardError, DashboardSnapshot, Fetch, Notice};
use crate::domain::Order;
use crate::verification::{Phase, UnitKey};

/// Client for the dashboard actor. Cheap to clone; every clone talks to the same
/// dashboard state.
#[derive(Clone)]
pub struct DashboardClient {
    sender: mpsc::Sender<DashboardRequest>,
}

impl DashboardClient {
    pub fn new(sender: mpsc::Sender<DashboardRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), DashboardError> {
        debug!("Sending shutdown request");
        self.sender
            .send(DashboardRequest::Shutdown)
            .await
            .map_err(|e| DashboardError::ActorCommunicationError(e.to_string()))
    }
}

// Order list and detail
client_method!(DashboardClient => fn load_orders() -> Fetch<Vec<Order>> as DashboardRequest::LoadOrders, Error = DashboardError);
client_method!(DashboardClient => fn select_order(id: String) -> Fetch<Order> as DashboardRequest::SelectOrder, Error = DashboardError);

// Verification
client_method!(DashboardClient => fn open_verification() -> usize as DashboardRequest::OpenVerification, Error = DashboardError);
client_method!(DashboardClient => fn close_verification() -> () as DashboardRequest::CloseVerification, Error = DashboardError);
client_method!(DashboardClient => fn set_scanned_value(key: UnitKey, value: String) -> () as DashboardRequest::SetScannedValue, Error = DashboardError);
client_method!(DashboardClient => fn verify(key: UnitKey) -> Phase as DashboardRequest::Verify, Error = DashboardError);
client_method!(DashboardClient => fn request_cancel(key: UnitKey) -> () as DashboardRequest::RequestCancel, Error = DashboardError);
client_method!(DashboardClient => fn confirm_cancel(key: UnitKey) -> () as DashboardRequest::ConfirmCancel, Error = DashboardError);
client_method!(DashboardClient => fn dismiss_cancel() -> Option<UnitKey> as DashboardRequest::DismissCancel, Error = DashboardError);
client_method!(DashboardClient => fn verification_ready() -> bool as DashboardRequest::VerificationReady, Error = DashboardError);

// Status transitions
client_method!(DashboardClient => fn confirm_and_process() -> Order as DashboardRequest::ConfirmAndProcess, Error = DashboardError);
client_method!(DashboardClient => fn complete_order() -> Order as DashboardRequest::CompleteOrder, Error = DashboardError);
client_method!(DashboardClient => fn cancel_order() -> Order as DashboardRequest::CancelOrder, Error = DashboardError);

// Views
client_method!(DashboardClient => fn snapshot() -> DashboardSnapshot as DashboardRequest::Snapshot, Error = DashboardError);
client_method!(DashboardClient => fn take_notices() -> Vec<Notice> as DashboardRequest::TakeNotices, Error = DashboardError);
