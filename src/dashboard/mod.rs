//! The order dashboard: list, detail, status transitions and the verification
//! step, driven by a root actor that orchestrates the order repository.

mod display;
mod error;
pub mod messages;
mod service;
mod state;

pub use display::*;
pub use error::*;
pub use service::*;
pub use state::*;
