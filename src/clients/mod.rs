//! Typed clients for the actors in the system.

#[macro_use]
mod macros;

mod dashboard_client;
mod order_client;

pub use dashboard_client::*;
pub use order_client::*;
