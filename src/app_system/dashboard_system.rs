use chrono::Utc;
use tracing::{error, info, instrument, warn};

use super::{SystemConfig, SystemError};
use crate::actor_framework::ResourceActor;
use crate::clients::{DashboardClient, OrderClient};
use crate::dashboard::DashboardService;
use crate::domain::Order;
use crate::order_actor::mock_orders;

/// Starts the order repository and the dashboard, wires them together, and
/// shuts them down in dependency order.
pub struct DashboardSystem {
    pub dashboard: DashboardClient,
    pub orders: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DashboardSystem {
    /// Start with the demo orders.
    pub fn start(config: SystemConfig) -> Self {
        Self::with_orders(config, mock_orders(Utc::now()))
    }

    /// Start with a repository seeded from `seed`.
    ///
    /// **Startup Order:**
    /// 1. Order repository (no dependencies)
    /// 2. Dashboard, holding a client to the repository
    #[instrument(name = "dashboard_system", skip(config, seed))]
    pub fn with_orders(config: SystemConfig, seed: Vec<Order>) -> Self {
        info!(orders = seed.len(), "Starting dashboard system");

        let (repository, resource_client) = ResourceActor::<Order>::new(
            config.repository.buffer_size,
            config.repository.latency,
            seed,
        );
        let orders = OrderClient::new(resource_client);
        let repository_handle = tokio::spawn(repository.run());

        let (service, dashboard) = DashboardService::new(&config.dashboard, orders.clone());
        let dashboard_handle = tokio::spawn(service.run());

        info!("Dashboard system started");
        Self {
            dashboard,
            orders,
            handles: vec![dashboard_handle, repository_handle],
        }
    }

    /// Stops the dashboard first, then the repository, and waits for both.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down dashboard system");

        if let Err(e) = self.dashboard.shutdown().await {
            warn!(error = %e, "Dashboard already stopped");
        }
        if let Err(e) = self.orders.shutdown().await {
            warn!(error = %e, "Order repository already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("Dashboard system shutdown complete");
        Ok(())
    }
}
