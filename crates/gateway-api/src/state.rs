//! Application state for the REST API

use gateway_core::{GatewayService, PeripheralService, Storage};

/// Application state shared across all handlers
///
/// Both services wrap the same [`Storage`], so writes issued through either
/// one are serialized together.
#[derive(Debug, Clone)]
pub struct AppState {
    pub gateways: GatewayService,
    pub peripherals: PeripheralService,
}

impl AppState {
    /// Create state over `storage` with the default peripheral limit
    pub fn new(storage: Storage) -> Self {
        Self::from_services(
            GatewayService::new(storage.clone()),
            PeripheralService::new(storage),
        )
    }

    /// Create state over `storage` allowing `max_peripherals` per gateway
    pub fn with_max_peripherals(storage: Storage, max_peripherals: usize) -> Self {
        Self::from_services(
            GatewayService::with_max_peripherals(storage.clone(), max_peripherals),
            PeripheralService::new(storage),
        )
    }

    /// Create state from already built services
    pub fn from_services(gateways: GatewayService, peripherals: PeripheralService) -> Self {
        Self {
            gateways,
            peripherals,
        }
    }
}
