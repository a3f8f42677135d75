use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderStatus};

/// Changes the repository accepts for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderPatch {
    /// Set the status and stamp `updated_at` with the repository clock.
    Status(OrderStatus),
}

impl Entity for Order {
    type Id = String;
    type Patch = OrderPatch;

    fn id(&self) -> &String {
        &self.id
    }

    /// Applies a status change.
    ///
    /// The repository does not police the lifecycle; that is the dashboard's job.
    /// It only guarantees `updated_at` never moves backwards.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), String> {
        match patch {
            OrderPatch::Status(status) => {
                self.status = status;
                self.updated_at = Utc::now().max(self.updated_at);
            }
        }
        Ok(())
    }
}
