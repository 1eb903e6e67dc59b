//! Domain services enforcing the association rules
//!
//! Both services are cheap to clone and share one [`Storage`](crate::Storage)
//! handle, so they serialize their writes against each other.

mod gateway;
mod peripheral;

pub use gateway::GatewayService;
pub use peripheral::PeripheralService;

/// Peripherals a gateway may own unless configured otherwise
pub const DEFAULT_MAX_PERIPHERALS: usize = 10;
