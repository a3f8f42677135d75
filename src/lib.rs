//! # order-vista
//!
//! Core of a small order-management dashboard, built as a set of tokio actors.
//!
//! - **Order repository** - a [`ResourceActor`](actor_framework::ResourceActor)
//!   serving mock orders with simulated latency → [`OrderClient`](clients::OrderClient)
//! - **Verification** - per-unit barcode checks that gate processing →
//!   [`VerificationWorkflow`](verification::VerificationWorkflow)
//! - **Dashboard** - root actor holding list, detail and workflow state, driving
//!   status transitions → [`DashboardClient`](clients::DashboardClient)
//! - **System coordinator** - startup, wiring and shutdown →
//!   [`DashboardSystem`](app_system::DashboardSystem)
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use order_vista::app_system::{DashboardSystem, SystemConfig};
//!
//! let system = DashboardSystem::start(SystemConfig::default());
//! system.dashboard.load_orders().await?;
//! system.dashboard.select_order("1001".to_string()).await?;
//! let units = system.dashboard.open_verification().await?;
//! println!("{units} units to scan");
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod dashboard;
pub mod domain;
pub mod order_actor;
pub mod verification;

#[cfg(test)]
mod mock_framework;
