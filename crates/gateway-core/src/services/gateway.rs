//! Gateway domain service

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::error::{DomainError, DomainResult};
use crate::ipv4::is_valid_ipv4;
use crate::models::{Gateway, GatewayRecord, Peripheral, PeripheralUid};
use crate::repository::Storage;

use super::DEFAULT_MAX_PERIPHERALS;

/// Gateway CRUD plus attaching and detaching peripherals
#[derive(Debug, Clone)]
pub struct GatewayService {
    storage: Storage,
    max_peripherals: usize,
}

impl GatewayService {
    /// Create a service with the default peripheral limit
    pub fn new(storage: Storage) -> Self {
        Self::with_max_peripherals(storage, DEFAULT_MAX_PERIPHERALS)
    }

    /// Create a service allowing at most `max_peripherals` per gateway
    pub fn with_max_peripherals(storage: Storage, max_peripherals: usize) -> Self {
        Self {
            storage,
            max_peripherals,
        }
    }

    pub fn max_peripherals(&self) -> usize {
        self.max_peripherals
    }

    async fn resolve(&self, serial_number: &str) -> DomainResult<GatewayRecord> {
        self.storage
            .gateways()
            .find_by_id(serial_number)
            .await?
            .ok_or_else(|| DomainError::gateway_not_found(serial_number))
    }

    async fn resolve_peripheral(&self, uid: PeripheralUid) -> DomainResult<Peripheral> {
        self.storage
            .peripherals()
            .find_by_id(uid)
            .await?
            .ok_or_else(|| DomainError::peripheral_not_found(uid))
    }

    async fn assemble(&self, record: GatewayRecord) -> DomainResult<Gateway> {
        let peripherals = self
            .storage
            .peripherals()
            .find_by_gateway(&record.serial_number)
            .await?;
        Ok(Gateway::from_record(record, peripherals))
    }

    async fn ensure_capacity(&self, gateway: &GatewayRecord) -> DomainResult<()> {
        let owned = self
            .storage
            .peripherals()
            .find_by_gateway(&gateway.serial_number)
            .await?
            .len();

        if owned >= self.max_peripherals {
            debug!(
                serial_number = %gateway.serial_number,
                owned,
                limit = self.max_peripherals,
                "Gateway is full"
            );
            return Err(DomainError::capacity_exceeded(
                &gateway.serial_number,
                self.max_peripherals,
            ));
        }
        Ok(())
    }

    /// All gateways with their peripherals, in store order
    pub async fn list_gateways(&self) -> DomainResult<Vec<Gateway>> {
        let records = self.storage.gateways().find_all().await?;
        let mut gateways = Vec::with_capacity(records.len());
        for record in records {
            gateways.push(self.assemble(record).await?);
        }
        debug!(count = gateways.len(), "Listed gateways");
        Ok(gateways)
    }

    pub async fn get_gateway(&self, serial_number: &str) -> DomainResult<Gateway> {
        let record = self.resolve(serial_number).await?;
        self.assemble(record).await
    }

    /// Peripherals owned by the gateway
    pub async fn list_peripherals(&self, serial_number: &str) -> DomainResult<Vec<Peripheral>> {
        let record = self.resolve(serial_number).await?;
        self.storage
            .peripherals()
            .find_by_gateway(&record.serial_number)
            .await
    }

    /// Create a gateway, attaching any peripherals it carries
    ///
    /// Every check, including uid collisions for the whole peripheral batch,
    /// runs before the first write.
    pub async fn create_gateway(&self, gateway: Gateway) -> DomainResult<Gateway> {
        let _guard = self.storage.lock_writes().await;

        if gateway.serial_number.is_empty() {
            return Err(DomainError::blank_fields("Create", "Gateway"));
        }
        if self
            .storage
            .gateways()
            .find_by_id(&gateway.serial_number)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate_gateway(&gateway.serial_number));
        }
        if !is_valid_ipv4(&gateway.ipv4_address) {
            return Err(DomainError::invalid_ipv4(&gateway.ipv4_address));
        }
        if self
            .storage
            .gateways()
            .find_by_ipv4_address(&gateway.ipv4_address)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate_ipv4(&gateway.ipv4_address));
        }

        if gateway.peripherals.len() > self.max_peripherals {
            return Err(DomainError::capacity_exceeded(
                &gateway.serial_number,
                self.max_peripherals,
            ));
        }
        let mut seen = HashSet::with_capacity(gateway.peripherals.len());
        for peripheral in &gateway.peripherals {
            if !seen.insert(peripheral.uid)
                || self
                    .storage
                    .peripherals()
                    .find_by_id(peripheral.uid)
                    .await?
                    .is_some()
            {
                return Err(DomainError::duplicate_peripheral(peripheral.uid));
            }
        }

        let record = self.storage.gateways().save(gateway.record()).await?;

        let mut attached = Vec::with_capacity(gateway.peripherals.len());
        for mut peripheral in gateway.peripherals {
            peripheral.gateway_serial = Some(record.serial_number.clone());
            attached.push(self.storage.peripherals().save(peripheral).await?);
        }

        info!(
            serial_number = %record.serial_number,
            ipv4_address = %record.ipv4_address,
            peripherals = attached.len(),
            "Gateway created"
        );

        Ok(Gateway::from_record(record, attached))
    }

    /// Create a new peripheral owned by the gateway
    pub async fn attach_peripheral(
        &self,
        serial_number: &str,
        mut peripheral: Peripheral,
    ) -> DomainResult<Peripheral> {
        let _guard = self.storage.lock_writes().await;

        let gateway = self.resolve(serial_number).await?;
        if self
            .storage
            .peripherals()
            .find_by_id(peripheral.uid)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate_peripheral(peripheral.uid));
        }
        self.ensure_capacity(&gateway).await?;

        peripheral.gateway_serial = Some(gateway.serial_number.clone());
        let created = self.storage.peripherals().save(peripheral).await?;

        info!(
            serial_number = %gateway.serial_number,
            uid = created.uid,
            "Peripheral attached"
        );
        Ok(created)
    }

    /// Move an existing peripheral under the gateway, replacing any previous owner
    pub async fn associate_peripheral(
        &self,
        serial_number: &str,
        uid: PeripheralUid,
    ) -> DomainResult<()> {
        let _guard = self.storage.lock_writes().await;

        let gateway = self.resolve(serial_number).await?;
        let mut peripheral = self.resolve_peripheral(uid).await?;
        self.ensure_capacity(&gateway).await?;

        let previous = peripheral
            .gateway_serial
            .replace(gateway.serial_number.clone());
        self.storage.peripherals().save(peripheral).await?;

        info!(
            serial_number = %gateway.serial_number,
            uid,
            previous_owner = ?previous,
            "Peripheral associated"
        );
        Ok(())
    }

    /// Replace a gateway's name and address
    ///
    /// The serial number always comes from `serial_number`; the one in
    /// `details` is ignored, as is its peripheral list.
    pub async fn update_gateway(
        &self,
        serial_number: &str,
        details: Gateway,
    ) -> DomainResult<Gateway> {
        let _guard = self.storage.lock_writes().await;

        if !is_valid_ipv4(&details.ipv4_address) {
            return Err(DomainError::invalid_ipv4(&details.ipv4_address));
        }
        let existing = self.resolve(serial_number).await?;

        // Resubmitting the current address counts as a conflict.
        if !details.ipv4_address.is_empty()
            && details
                .ipv4_address
                .eq_ignore_ascii_case(&existing.ipv4_address)
        {
            return Err(DomainError::duplicate_ipv4(&details.ipv4_address));
        }
        // Any holder left at this point is a different gateway
        if self
            .storage
            .gateways()
            .find_by_ipv4_address(&details.ipv4_address)
            .await?
            .is_some()
        {
            return Err(DomainError::duplicate_ipv4(&details.ipv4_address));
        }

        let record = GatewayRecord {
            serial_number: existing.serial_number,
            human_readable_name: details.human_readable_name,
            ipv4_address: details.ipv4_address,
        };
        let saved = self.storage.gateways().save(record).await?;

        info!(
            serial_number = %saved.serial_number,
            ipv4_address = %saved.ipv4_address,
            "Gateway updated"
        );
        self.assemble(saved).await
    }

    /// Delete a peripheral through the gateway that owns it
    pub async fn remove_peripheral(
        &self,
        serial_number: &str,
        uid: PeripheralUid,
    ) -> DomainResult<()> {
        let _guard = self.storage.lock_writes().await;

        let gateway = self.resolve(serial_number).await?;
        let peripheral = self.resolve_peripheral(uid).await?;

        if !peripheral.is_owned_by(&gateway.serial_number) {
            debug!(
                serial_number = %gateway.serial_number,
                uid,
                owner = ?peripheral.gateway_serial,
                "Peripheral belongs to another gateway"
            );
            return Err(DomainError::not_owner(&gateway.serial_number, uid));
        }

        self.storage.peripherals().delete(uid).await?;
        info!(serial_number = %gateway.serial_number, uid, "Peripheral removed");
        Ok(())
    }

    /// Delete a gateway. Its peripherals stay, unassigned.
    ///
    /// If releasing a peripheral fails, the peripherals already released are
    /// handed back and the gateway row is restored before the error returns.
    pub async fn delete_gateway(&self, serial_number: &str) -> DomainResult<()> {
        let _guard = self.storage.lock_writes().await;

        let gateway = self.resolve(serial_number).await?;
        let owned = self
            .storage
            .peripherals()
            .find_by_gateway(&gateway.serial_number)
            .await?;

        self.storage
            .gateways()
            .delete(&gateway.serial_number)
            .await?;

        let mut released = Vec::with_capacity(owned.len());
        for mut peripheral in owned {
            peripheral.gateway_serial = None;
            match self.storage.peripherals().save(peripheral).await {
                Ok(saved) => released.push(saved),
                Err(e) => {
                    self.restore(gateway.clone(), released).await;
                    return Err(e);
                }
            }
        }

        info!(
            serial_number = %gateway.serial_number,
            released = released.len(),
            "Gateway deleted"
        );
        Ok(())
    }

    /// Undo a partly applied gateway delete
    async fn restore(&self, gateway: GatewayRecord, released: Vec<Peripheral>) {
        for mut peripheral in released {
            let uid = peripheral.uid;
            peripheral.gateway_serial = Some(gateway.serial_number.clone());
            if let Err(e) = self.storage.peripherals().save(peripheral).await {
                error!(
                    serial_number = %gateway.serial_number,
                    uid,
                    error = %e,
                    "Failed to reassign peripheral"
                );
            }
        }

        let serial_number = gateway.serial_number.clone();
        match self.storage.gateways().save(gateway).await {
            Ok(_) => warn!(serial_number = %serial_number, "Gateway delete rolled back"),
            Err(e) => error!(
                serial_number = %serial_number,
                error = %e,
                "Failed to restore gateway"
            ),
        }
    }
}
