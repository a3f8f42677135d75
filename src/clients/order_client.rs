use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderStatus};
use crate::order_actor::{OrderError, OrderPatch};

/// Client for the order repository actor.
///
/// Lookups that find nothing come back as `Ok(None)`; `Err` is reserved for
/// transport or repository failures.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.get(id).await?)
    }

    /// Sets the status and refreshes `updated_at` on the repository side.
    #[instrument(skip(self))]
    pub async fn set_order_status(&self, id: String, status: OrderStatus) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.update(id, OrderPatch::Status(status)).await?)
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), OrderError> {
        debug!("Sending shutdown request");
        Ok(self.inner.shutdown().await?)
    }
}
