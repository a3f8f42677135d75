pub mod customer;
pub mod line_item;
pub mod order;

pub use customer::*;
pub use line_item::*;
pub use order::*;
