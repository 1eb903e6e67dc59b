//! Repository traits and the storage handle passed to services
//!
//! The services never touch a concrete store. They persist through the two
//! traits below, bundled together with a write lock in [`Storage`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};

use crate::error::DomainResult;
use crate::memory::MemoryStore;
use crate::models::{GatewayRecord, Peripheral, PeripheralUid};

/// Key-based persistence for gateway rows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GatewayRepository: Send + Sync {
    /// Look up a gateway by serial number
    async fn find_by_id(&self, serial_number: &str) -> DomainResult<Option<GatewayRecord>>;

    /// All gateways, in store order
    async fn find_all(&self) -> DomainResult<Vec<GatewayRecord>>;

    /// The gateway currently using `address`, if any
    async fn find_by_ipv4_address(&self, address: &str) -> DomainResult<Option<GatewayRecord>>;

    /// Insert or overwrite by serial number
    async fn save(&self, gateway: GatewayRecord) -> DomainResult<GatewayRecord>;

    /// Remove a gateway row. Missing rows are ignored.
    async fn delete(&self, serial_number: &str) -> DomainResult<()>;
}

/// Key-based persistence for peripherals
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeripheralRepository: Send + Sync {
    async fn find_by_id(&self, uid: PeripheralUid) -> DomainResult<Option<Peripheral>>;

    /// All peripherals, in store order
    async fn find_all(&self) -> DomainResult<Vec<Peripheral>>;

    /// Peripherals owned by some gateway
    async fn find_by_gateway_not_null(&self) -> DomainResult<Vec<Peripheral>>;

    /// Peripherals owned by no gateway
    async fn find_by_gateway_null(&self) -> DomainResult<Vec<Peripheral>>;

    /// Peripherals owned by the gateway with `serial_number`
    async fn find_by_gateway(&self, serial_number: &str) -> DomainResult<Vec<Peripheral>>;

    /// Insert or overwrite by uid
    async fn save(&self, peripheral: Peripheral) -> DomainResult<Peripheral>;

    /// Remove a peripheral. Missing rows are ignored.
    async fn delete(&self, uid: PeripheralUid) -> DomainResult<()>;
}

/// Storage handle shared by the domain services
///
/// Built once at startup and cloned into each service. Mutating service
/// operations hold the write lock across their checks and writes, so two
/// requests cannot both pass a uniqueness or capacity check before either
/// one writes.
#[derive(Clone)]
pub struct Storage {
    gateways: Arc<dyn GatewayRepository>,
    peripherals: Arc<dyn PeripheralRepository>,
    write_lock: Arc<Mutex<()>>,
}

impl Storage {
    /// Create a storage handle over the given repositories
    pub fn new(
        gateways: Arc<dyn GatewayRepository>,
        peripherals: Arc<dyn PeripheralRepository>,
    ) -> Self {
        Self {
            gateways,
            peripherals,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create a storage handle backed by a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store)
    }

    pub fn gateways(&self) -> &dyn GatewayRepository {
        self.gateways.as_ref()
    }

    pub fn peripherals(&self) -> &dyn PeripheralRepository {
        self.peripherals.as_ref()
    }

    /// Serialize a mutating operation against every other one
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
