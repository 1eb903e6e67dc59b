//! gateway-core - Core models and domain services for the gateway registry
//!
//! This crate holds everything that does not depend on HTTP: the Gateway and
//! Peripheral models, the error taxonomy, the repository traits the services
//! persist through, an in-memory store, and the two domain services that
//! enforce association rules (capacity, ownership, uniqueness).
//!
//! # Usage
//!
//! ```ignore
//! use gateway_core::{Gateway, GatewayService, Storage};
//!
//! let storage = Storage::in_memory();
//! let gateways = GatewayService::new(storage.clone());
//! let created = gateways
//!     .create_gateway(Gateway::new("RECM12345M8C", "Admon RRHH", "192.168.10.254"))
//!     .await?;
//! ```

pub mod error;
pub mod ipv4;
pub mod memory;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use error::{DomainError, DomainResult};
pub use ipv4::is_valid_ipv4;
pub use memory::MemoryStore;
pub use models::*;
pub use repository::{GatewayRepository, PeripheralRepository, Storage};
pub use seed::{SeedData, SeedError, SeedReport};
pub use services::{GatewayService, PeripheralService, DEFAULT_MAX_PERIPHERALS};
