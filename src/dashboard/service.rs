use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn, Instrument};

use super::messages::{DashboardRequest, DashboardResponse};
use super::{DashboardError, DashboardSnapshot, Fetch, Notice, VerificationView};
use crate::app_system::DashboardConfig;
use crate::clients::{DashboardClient, OrderClient};
use crate::domain::{Order, OrderStatus};
use crate::order_actor::OrderError;
use crate::verification::{PendingCheck, Phase, UnitKey, VerificationError, VerificationWorkflow};

/// Results of background work, fed back into the actor loop.
///
/// Every variant carries what is needed to decide whether the result is still
/// current when it arrives.
enum Completion {
    OrdersLoaded {
        token: u64,
        result: Result<Vec<Order>, OrderError>,
        respond_to: DashboardResponse<Fetch<Vec<Order>>>,
    },
    OrderLoaded {
        token: u64,
        id: String,
        result: Result<Option<Order>, OrderError>,
        respond_to: Option<DashboardResponse<Fetch<Order>>>,
    },
    StatusUpdated {
        id: String,
        status: OrderStatus,
        result: Result<Option<Order>, OrderError>,
        respond_to: DashboardResponse<Order>,
    },
    VerificationResolved {
        check: PendingCheck,
        respond_to: DashboardResponse<Phase>,
    },
}

/// Root actor behind the order dashboard.
///
/// Owns the order list, the selected order, and the verification workflow.
/// Repository calls and verification delays run in spawned tasks so the loop stays
/// responsive; their results come back as [`Completion`]s and are applied only if
/// the request token they carry is still the latest one.
pub struct DashboardService {
    receiver: mpsc::Receiver<DashboardRequest>,
    completions: mpsc::Receiver<Completion>,
    completion_sender: mpsc::Sender<Completion>,
    order_client: OrderClient,
    verify_delay: Duration,

    orders: Vec<Order>,
    selected_id: Option<String>,
    selected: Option<Order>,
    list_token: u64,
    detail_token: u64,
    loading_orders: bool,
    loading_detail: bool,
    updating_status: bool,
    workflow: VerificationWorkflow,
    verifying_order: Option<String>,
    notices: Vec<Notice>,
}

impl DashboardService {
    pub fn new(config: &DashboardConfig, order_client: OrderClient) -> (Self, DashboardClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        let (completion_sender, completions) = mpsc::channel(config.buffer_size);
        let service = Self {
            receiver,
            completions,
            completion_sender,
            order_client,
            verify_delay: config.verify_delay,
            orders: Vec::new(),
            selected_id: None,
            selected: None,
            list_token: 0,
            detail_token: 0,
            loading_orders: false,
            loading_detail: false,
            updating_status: false,
            workflow: VerificationWorkflow::default(),
            verifying_order: None,
            notices: Vec::new(),
        };
        (service, DashboardClient::new(sender))
    }

    #[instrument(name = "dashboard_service", skip(self))]
    pub async fn run(mut self) {
        info!("DashboardService starting");

        loop {
            tokio::select! {
                Some(completion) = self.completions.recv() => self.handle_completion(completion),
                msg = self.receiver.recv() => match msg {
                    Some(DashboardRequest::Shutdown) | None => {
                        info!("DashboardService shutting down");
                        break;
                    }
                    Some(request) => self.handle_request(request),
                },
            }
        }

        info!("DashboardService stopped");
    }

    fn handle_request(&mut self, request: DashboardRequest) {
        match request {
            DashboardRequest::LoadOrders { respond_to } => self.handle_load_orders(respond_to),
            DashboardRequest::SelectOrder { id, respond_to } => self.handle_select_order(id, Some(respond_to)),
            DashboardRequest::OpenVerification { respond_to } => {
                let _ = respond_to.send(self.open_verification());
            }
            DashboardRequest::CloseVerification { respond_to } => {
                self.close_verification();
                let _ = respond_to.send(Ok(()));
            }
            DashboardRequest::SetScannedValue { key, value, respond_to } => {
                let _ = respond_to.send(self.with_workflow(|w| w.set_scanned_value(&key, value)));
            }
            DashboardRequest::Verify { key, respond_to } => self.handle_verify(key, respond_to),
            DashboardRequest::RequestCancel { key, respond_to } => {
                let _ = respond_to.send(self.with_workflow(|w| w.request_cancel(&key)));
            }
            DashboardRequest::ConfirmCancel { key, respond_to } => {
                let _ = respond_to.send(self.with_workflow(|w| w.confirm_cancel(&key)));
            }
            DashboardRequest::DismissCancel { respond_to } => {
                let _ = respond_to.send(self.with_workflow(|w| Ok(w.dismiss_cancel())));
            }
            DashboardRequest::VerificationReady { respond_to } => {
                let _ = respond_to.send(self.with_workflow(|w| Ok(w.is_ready_to_submit())));
            }
            DashboardRequest::ConfirmAndProcess { respond_to } => {
                self.handle_transition(OrderStatus::Processing, respond_to)
            }
            DashboardRequest::CompleteOrder { respond_to } => {
                self.handle_transition(OrderStatus::Completed, respond_to)
            }
            DashboardRequest::CancelOrder { respond_to } => {
                self.handle_transition(OrderStatus::Cancelled, respond_to)
            }
            DashboardRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.snapshot()));
            }
            DashboardRequest::TakeNotices { respond_to } => {
                let _ = respond_to.send(Ok(std::mem::take(&mut self.notices)));
            }
            // Handled by the run loop.
            DashboardRequest::Shutdown => {}
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::OrdersLoaded {
                token,
                result,
                respond_to,
            } => self.on_orders_loaded(token, result, respond_to),
            Completion::OrderLoaded {
                token,
                id,
                result,
                respond_to,
            } => self.on_order_loaded(token, id, result, respond_to),
            Completion::StatusUpdated {
                id,
                status,
                result,
                respond_to,
            } => self.on_status_updated(id, status, result, respond_to),
            Completion::VerificationResolved { check, respond_to } => {
                let result = self.workflow.resolve(check).map_err(DashboardError::from);
                let _ = respond_to.send(result);
            }
        }
    }

    /// Runs `work` off the actor loop and posts its completion back.
    fn spawn_completion<F>(&self, work: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let completions = self.completion_sender.clone();
        tokio::spawn(
            async move {
                let completion = work.await;
                if completions.send(completion).await.is_err() {
                    debug!("Dashboard stopped before completion arrived");
                }
            }
            .in_current_span(),
        );
    }

    // -------------------------------------------------------------------------
    // Order list and selection
    // -------------------------------------------------------------------------

    #[instrument(skip(self, respond_to))]
    fn handle_load_orders(&mut self, respond_to: DashboardResponse<Fetch<Vec<Order>>>) {
        self.list_token += 1;
        let token = self.list_token;
        self.loading_orders = true;
        debug!(token, "Fetching orders");

        let client = self.order_client.clone();
        self.spawn_completion(async move {
            let result = client.list_orders().await;
            Completion::OrdersLoaded {
                token,
                result,
                respond_to,
            }
        });
    }

    #[instrument(skip(self, result, respond_to))]
    fn on_orders_loaded(
        &mut self,
        token: u64,
        result: Result<Vec<Order>, OrderError>,
        respond_to: DashboardResponse<Fetch<Vec<Order>>>,
    ) {
        if token != self.list_token {
            warn!(current = self.list_token, "Discarding stale order list");
            let _ = respond_to.send(Ok(Fetch::Stale));
            return;
        }
        self.loading_orders = false;

        match result {
            Ok(orders) => {
                info!(count = orders.len(), "Orders loaded");
                self.orders = orders.clone();
                if self.selected_id.is_none() {
                    if let Some(first) = self.orders.first() {
                        let id = first.id.clone();
                        debug!(order_id = %id, "Auto-selecting first order");
                        self.handle_select_order(id, None);
                    }
                }
                let _ = respond_to.send(Ok(Fetch::Applied(orders)));
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch orders");
                self.notices
                    .push(Notice::error("Error", "Failed to load orders. Please try again."));
                let _ = respond_to.send(Err(e.into()));
            }
        }
    }

    #[instrument(fields(order_id = %id), skip(self, id, respond_to))]
    fn handle_select_order(&mut self, id: String, respond_to: Option<DashboardResponse<Fetch<Order>>>) {
        self.detail_token += 1;
        let token = self.detail_token;
        if self.verifying_order.as_deref().is_some_and(|open| open != id) {
            debug!("Selection changed, discarding verification");
            self.close_verification();
        }
        if self.selected.as_ref().is_some_and(|shown| shown.id != id) {
            self.selected = None;
        }
        self.selected_id = Some(id.clone());
        self.loading_detail = true;
        debug!(token, "Fetching order");

        let client = self.order_client.clone();
        self.spawn_completion(async move {
            let result = client.get_order(id.clone()).await;
            Completion::OrderLoaded {
                token,
                id,
                result,
                respond_to,
            }
        });
    }

    #[instrument(fields(order_id = %id), skip(self, id, result, respond_to))]
    fn on_order_loaded(
        &mut self,
        token: u64,
        id: String,
        result: Result<Option<Order>, OrderError>,
        respond_to: Option<DashboardResponse<Fetch<Order>>>,
    ) {
        let reply = |outcome: Result<Fetch<Order>, DashboardError>| {
            if let Some(respond_to) = respond_to {
                let _ = respond_to.send(outcome);
            }
        };

        if token != self.detail_token {
            warn!(current = self.detail_token, "Discarding stale order detail");
            reply(Ok(Fetch::Stale));
            return;
        }
        self.loading_detail = false;

        match result {
            Ok(Some(order)) => {
                info!(status = %order.status, "Order detail loaded");
                if self.verifying_order.as_deref().is_some_and(|open| open != order.id) {
                    self.close_verification();
                }
                self.selected = Some(order.clone());
                reply(Ok(Fetch::Applied(order)));
            }
            Ok(None) => {
                warn!("Order not found");
                self.selected = None;
                self.notices.push(Notice::error(
                    "Not Found",
                    format!("Order #{id} could not be found."),
                ));
                reply(Ok(Fetch::NotFound));
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch order details");
                self.notices.push(Notice::error(
                    "Error",
                    "Failed to load order details. Please try again.",
                ));
                reply(Err(e.into()));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Verification
    // -------------------------------------------------------------------------

    /// The loaded detail for the current selection. Nothing acts on an order
    /// while its detail is still being fetched.
    fn current_order(&self) -> Result<&Order, OrderError> {
        if self.loading_detail {
            return Err(OrderError::DetailLoading);
        }
        self.selected
            .as_ref()
            .filter(|order| self.selected_id.as_deref() == Some(order.id.as_str()))
            .ok_or(OrderError::NoOrderSelected)
    }

    #[instrument(skip(self))]
    fn open_verification(&mut self) -> Result<usize, DashboardError> {
        self.current_order()?;
        let Some(order) = self.selected.as_ref() else {
            return Err(OrderError::NoOrderSelected.into());
        };
        if !order.status.can_transition_to(OrderStatus::Processing) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Processing,
            }
            .into());
        }

        let units = self.workflow.initialize(&order.items)?;
        self.verifying_order = Some(order.id.clone());
        info!(order_id = %order.id, units, "Verification opened");
        Ok(units)
    }

    fn close_verification(&mut self) {
        if let Some(order_id) = self.verifying_order.take() {
            self.workflow.close();
            debug!(order_id = %order_id, "Verification closed");
        }
    }

    fn with_workflow<T>(
        &mut self,
        op: impl FnOnce(&mut VerificationWorkflow) -> Result<T, VerificationError>,
    ) -> Result<T, DashboardError> {
        if self.verifying_order.is_none() {
            return Err(VerificationError::NotOpen.into());
        }
        Ok(op(&mut self.workflow)?)
    }

    #[instrument(fields(unit = %key), skip(self, key, respond_to))]
    fn handle_verify(&mut self, key: UnitKey, respond_to: DashboardResponse<Phase>) {
        let check = match self.with_workflow(|w| w.begin_verify(&key)) {
            Ok(check) => check,
            Err(e) => {
                warn!(error = %e, "Verify refused");
                let _ = respond_to.send(Err(e));
                return;
            }
        };

        let delay = self.verify_delay;
        self.spawn_completion(async move {
            tokio::time::sleep(delay).await;
            Completion::VerificationResolved { check, respond_to }
        });
    }

    // -------------------------------------------------------------------------
    // Status transitions
    // -------------------------------------------------------------------------

    #[instrument(skip(self, respond_to))]
    fn handle_transition(&mut self, target: OrderStatus, respond_to: DashboardResponse<Order>) {
        let id = match self.prepare_transition(target) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Status change refused");
                let _ = respond_to.send(Err(e));
                return;
            }
        };

        self.updating_status = true;
        info!(order_id = %id, "Updating order status");
        let client = self.order_client.clone();
        self.spawn_completion(async move {
            let result = client.set_order_status(id.clone(), target).await;
            Completion::StatusUpdated {
                id,
                status: target,
                result,
                respond_to,
            }
        });
    }

    /// Checks the lifecycle and, for `Processing`, the verification gate.
    fn prepare_transition(&self, target: OrderStatus) -> Result<String, DashboardError> {
        let order = self.current_order()?;
        if self.updating_status {
            return Err(OrderError::UpdateInFlight.into());
        }
        if !order.status.can_transition_to(target) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: target,
            }
            .into());
        }
        if target == OrderStatus::Processing {
            if self.verifying_order.as_deref() != Some(order.id.as_str()) {
                return Err(OrderError::VerificationRequired.into());
            }
            let receipt = self.workflow.submit()?;
            info!(
                verified = receipt.verified,
                cancelled = receipt.cancelled,
                "Verification submitted"
            );
        }
        Ok(order.id.clone())
    }

    #[instrument(fields(order_id = %id), skip(self, id, result, respond_to))]
    fn on_status_updated(
        &mut self,
        id: String,
        status: OrderStatus,
        result: Result<Option<Order>, OrderError>,
        respond_to: DashboardResponse<Order>,
    ) {
        self.updating_status = false;

        match result {
            Ok(Some(order)) => {
                if let Some(entry) = self.orders.iter_mut().find(|entry| entry.id == order.id) {
                    *entry = order.clone();
                }
                if self.selected.as_ref().is_some_and(|selected| selected.id == order.id) {
                    self.selected = Some(order.clone());
                }
                if self.verifying_order.as_deref() == Some(id.as_str()) {
                    self.close_verification();
                }
                info!("Order status updated");
                self.notices.push(Notice::info(
                    "Status updated",
                    format!("Order status updated to {status}"),
                ));
                let _ = respond_to.send(Ok(order));
            }
            Ok(None) => {
                error!("Order vanished before its status could be updated");
                self.notices
                    .push(Notice::error("Error", "Failed to update order status"));
                let _ = respond_to.send(Err(OrderError::NotFound(id).into()));
            }
            Err(e) => {
                error!(error = %e, "Status update failed");
                self.notices.push(Notice::error(
                    "Error",
                    "An error occurred while updating order status",
                ));
                let _ = respond_to.send(Err(e.into()));
            }
        }
    }

    fn snapshot(&self) -> DashboardSnapshot {
        let verification = self.verifying_order.as_ref().map(|order_id| VerificationView {
            order_id: order_id.clone(),
            units: self
                .workflow
                .units()
                .map(|(key, state)| (key.clone(), state.clone()))
                .collect(),
            summary: self.workflow.summary(),
            pending_cancel: self.workflow.pending_cancel().cloned(),
            ready: self.workflow.is_ready_to_submit(),
        });

        DashboardSnapshot {
            orders: self.orders.clone(),
            selected_id: self.selected_id.clone(),
            selected: self.selected.clone(),
            loading_orders: self.loading_orders,
            loading_detail: self.loading_detail,
            updating_status: self.updating_status,
            verification,
        }
    }
}
