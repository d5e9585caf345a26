//! Infrastructure layer: counter storage, stock application, config.

pub mod config;
pub mod counter_store;
pub mod stock;


pub use config::InfraConfig;
pub use counter_store::{CounterRow, InMemoryCounterStore};
pub use stock::{StockError, StockService};
