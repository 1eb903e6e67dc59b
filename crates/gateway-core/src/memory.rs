//! In-memory store implementing both repositories
//!
//! Rows live in ordered maps so listings are stable (ascending serial number
//! and uid). Two secondary indexes are maintained on every write: IPv4
//! address → serial number for gateways, and owner serial number → uids for
//! peripherals.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::DomainResult;
use crate::models::{GatewayRecord, Peripheral, PeripheralUid};
use crate::repository::{GatewayRepository, PeripheralRepository};

#[derive(Debug, Default)]
struct GatewayTable {
    rows: BTreeMap<String, GatewayRecord>,
    by_ipv4: HashMap<String, String>,
}

impl GatewayTable {
    fn unindex(&mut self, row: &GatewayRecord) {
        if self.by_ipv4.get(&row.ipv4_address) == Some(&row.serial_number) {
            self.by_ipv4.remove(&row.ipv4_address);
        }
    }
}

#[derive(Debug, Default)]
struct PeripheralTable {
    rows: BTreeMap<PeripheralUid, Peripheral>,
    by_gateway: HashMap<String, BTreeSet<PeripheralUid>>,
}

impl PeripheralTable {
    fn unindex(&mut self, row: &Peripheral) {
        if let Some(serial) = &row.gateway_serial {
            if let Some(uids) = self.by_gateway.get_mut(serial) {
                uids.remove(&row.uid);
                if uids.is_empty() {
                    self.by_gateway.remove(serial);
                }
            }
        }
    }

    fn index(&mut self, row: &Peripheral) {
        if let Some(serial) = &row.gateway_serial {
            self.by_gateway
                .entry(serial.clone())
                .or_default()
                .insert(row.uid);
        }
    }
}

/// Thread-safe in-memory store for gateways and peripherals
#[derive(Debug, Default)]
pub struct MemoryStore {
    gateways: RwLock<GatewayTable>,
    peripherals: RwLock<PeripheralTable>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of gateway rows
    pub fn gateway_count(&self) -> usize {
        self.gateways.read().rows.len()
    }

    /// Number of peripheral rows
    pub fn peripheral_count(&self) -> usize {
        self.peripherals.read().rows.len()
    }
}

#[async_trait]
impl GatewayRepository for MemoryStore {
    async fn find_by_id(&self, serial_number: &str) -> DomainResult<Option<GatewayRecord>> {
        Ok(self.gateways.read().rows.get(serial_number).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<GatewayRecord>> {
        Ok(self.gateways.read().rows.values().cloned().collect())
    }

    async fn find_by_ipv4_address(&self, address: &str) -> DomainResult<Option<GatewayRecord>> {
        let table = self.gateways.read();
        Ok(table
            .by_ipv4
            .get(address)
            .and_then(|serial| table.rows.get(serial))
            .cloned())
    }

    async fn save(&self, gateway: GatewayRecord) -> DomainResult<GatewayRecord> {
        let mut table = self.gateways.write();
        if let Some(previous) = table.rows.remove(&gateway.serial_number) {
            table.unindex(&previous);
        }
        table
            .by_ipv4
            .insert(gateway.ipv4_address.clone(), gateway.serial_number.clone());
        table
            .rows
            .insert(gateway.serial_number.clone(), gateway.clone());
        Ok(gateway)
    }

    async fn delete(&self, serial_number: &str) -> DomainResult<()> {
        let mut table = self.gateways.write();
        if let Some(previous) = table.rows.remove(serial_number) {
            table.unindex(&previous);
        }
        Ok(())
    }
}

#[async_trait]
impl PeripheralRepository for MemoryStore {
    async fn find_by_id(&self, uid: PeripheralUid) -> DomainResult<Option<Peripheral>> {
        Ok(self.peripherals.read().rows.get(&uid).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Peripheral>> {
        Ok(self.peripherals.read().rows.values().cloned().collect())
    }

    async fn find_by_gateway_not_null(&self) -> DomainResult<Vec<Peripheral>> {
        Ok(self
            .peripherals
            .read()
            .rows
            .values()
            .filter(|p| p.is_assigned())
            .cloned()
            .collect())
    }

    async fn find_by_gateway_null(&self) -> DomainResult<Vec<Peripheral>> {
        Ok(self
            .peripherals
            .read()
            .rows
            .values()
            .filter(|p| !p.is_assigned())
            .cloned()
            .collect())
    }

    async fn find_by_gateway(&self, serial_number: &str) -> DomainResult<Vec<Peripheral>> {
        let table = self.peripherals.read();
        let Some(uids) = table.by_gateway.get(serial_number) else {
            return Ok(Vec::new());
        };
        Ok(uids
            .iter()
            .filter_map(|uid| table.rows.get(uid))
            .cloned()
            .collect())
    }

    async fn save(&self, peripheral: Peripheral) -> DomainResult<Peripheral> {
        let mut table = self.peripherals.write();
        if let Some(previous) = table.rows.remove(&peripheral.uid) {
            table.unindex(&previous);
        }
        table.index(&peripheral);
        table.rows.insert(peripheral.uid, peripheral.clone());
        Ok(peripheral)
    }

    async fn delete(&self, uid: PeripheralUid) -> DomainResult<()> {
        let mut table = self.peripherals.write();
        if let Some(previous) = table.rows.remove(&uid) {
            table.unindex(&previous);
        }
        Ok(())
    }
}
