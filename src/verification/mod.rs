//! Per-unit barcode verification that gates moving an order to processing.

mod error;
mod workflow;

pub use error::*;
pub use workflow::*;
