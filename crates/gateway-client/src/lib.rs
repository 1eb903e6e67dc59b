//! Gateway registry client library
//!
//! Provides a typed HTTP client for the gateway registry REST API.
//!
//! # Example
//!
//! ```rust,no_run
//! use gateway_client::{Gateway, GatewayClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GatewayClient::new("http://localhost:8080")?;
//!
//!     let created = client
//!         .create_gateway(&Gateway::new("RECM12345M8C", "Admon RRHH", "192.168.10.254"))
//!         .await?;
//!     let _peripherals = client.list_gateway_peripherals(&created.serial_number).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module runs a router on an ephemeral port:
//!
//! ```rust,ignore
//! use gateway_client::testing::TestServer;
//! use gateway_api::{create_router, AppState};
//!
//! let server = TestServer::start(create_router(state)).await?;
//! let gateways = server.client.list_gateways().await?;
//! ```

mod client;
mod error;
pub mod testing;

pub use client::GatewayClient;
pub use error::{GatewayClientError, Result};

// Re-export model types for convenience
pub use gateway_core::models::{Gateway, Peripheral, PeripheralUid};
