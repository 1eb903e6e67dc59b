//! Peripheral domain service

use tracing::{debug, info};

use crate::error::{DomainError, DomainResult};
use crate::models::{Peripheral, PeripheralUid};
use crate::repository::Storage;

/// Standalone peripheral CRUD
#[derive(Debug, Clone)]
pub struct PeripheralService {
    storage: Storage,
}

impl PeripheralService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    async fn resolve(&self, uid: PeripheralUid) -> DomainResult<Peripheral> {
        self.storage
            .peripherals()
            .find_by_id(uid)
            .await?
            .ok_or_else(|| DomainError::peripheral_not_found(uid))
    }

    /// All peripherals, ascending uid
    pub async fn list_peripherals(&self) -> DomainResult<Vec<Peripheral>> {
        self.storage.peripherals().find_all().await
    }

    /// Peripherals that do (`true`) or do not (`false`) belong to a gateway
    pub async fn list_by_association(&self, associated: bool) -> DomainResult<Vec<Peripheral>> {
        let peripherals = if associated {
            self.storage.peripherals().find_by_gateway_not_null().await?
        } else {
            self.storage.peripherals().find_by_gateway_null().await?
        };
        debug!(associated, count = peripherals.len(), "Listed peripherals by association");
        Ok(peripherals)
    }

    pub async fn get_peripheral(&self, uid: PeripheralUid) -> DomainResult<Peripheral> {
        self.resolve(uid).await
    }

    /// Create an unassigned peripheral
    pub async fn create_peripheral(&self, mut peripheral: Peripheral) -> DomainResult<Peripheral> {
        let _guard = self.storage.lock_writes().await;

        if peripheral.uid == 0 || peripheral.vendor.is_empty() {
            return Err(DomainError::blank_fields("Create", "Peripheral device"));
        }
        if self
            .storage
            .peripherals()
            .find_by_id(peripheral.uid)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate_peripheral(peripheral.uid));
        }

        peripheral.gateway_serial = None;
        let created = self.storage.peripherals().save(peripheral).await?;

        info!(uid = created.uid, vendor = %created.vendor, "Peripheral created");
        Ok(created)
    }

    /// Overwrite a peripheral, keeping its owner
    ///
    /// A missing `date_created` falls back to the stored one. Only when the
    /// date is present does an empty `vendor` fall back to the stored vendor.
    pub async fn update_peripheral(
        &self,
        uid: PeripheralUid,
        mut details: Peripheral,
    ) -> DomainResult<Peripheral> {
        let _guard = self.storage.lock_writes().await;

        let existing = self.resolve(uid).await?;

        if details.date_created.is_none() {
            details.date_created = existing.date_created;
        } else if details.vendor.is_empty() {
            details.vendor = existing.vendor;
        }
        details.gateway_serial = existing.gateway_serial;
        details.uid = uid;

        let saved = self.storage.peripherals().save(details).await?;
        info!(uid, "Peripheral updated");
        Ok(saved)
    }

    pub async fn delete_peripheral(&self, uid: PeripheralUid) -> DomainResult<()> {
        let _guard = self.storage.lock_writes().await;

        let peripheral = self.resolve(uid).await?;
        self.storage.peripherals().delete(peripheral.uid).await?;

        info!(uid, owner = ?peripheral.gateway_serial, "Peripheral deleted");
        Ok(())
    }
}
