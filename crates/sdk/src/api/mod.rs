//! API endpoint modules.

mod stock;

pub use stock::*;
