//! The mock order repository: `Order` served by a `ResourceActor`, its seed data
//! and errors.

pub mod entity;
pub mod error;
pub mod seed;

pub use entity::*;
pub use error::*;
pub use seed::*;
