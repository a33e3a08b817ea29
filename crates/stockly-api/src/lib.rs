// stockly-api: Async Rust client for the stockly inventory HTTP API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::InventoryClient;
pub use error::Error;
pub use transport::TransportConfig;
