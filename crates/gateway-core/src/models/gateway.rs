//! Gateway models

use serde::{Deserialize, Serialize};

use super::peripheral::Peripheral;

/// Gateway row as persisted by a [`GatewayRepository`](crate::GatewayRepository)
///
/// Peripherals are not stored on the row. Each peripheral carries the serial
/// number of its owner instead, and the listing is rebuilt by index lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRecord {
    /// Primary identifier, immutable after creation
    pub serial_number: String,
    /// Descriptive label
    pub human_readable_name: String,
    /// Dotted-quad IPv4 address, unique across gateways
    pub ipv4_address: String,
}

/// Gateway as exchanged over the API: the stored row plus its peripherals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gateway {
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub human_readable_name: String,
    #[serde(default)]
    pub ipv4_address: String,
    /// Peripherals owned by this gateway
    ///
    /// On create, any peripherals listed here are attached in the same call.
    /// On update the list is ignored.
    #[serde(default, alias = "peripheralDevices")]
    pub peripherals: Vec<Peripheral>,
}

impl Gateway {
    pub fn new(
        serial_number: impl Into<String>,
        human_readable_name: impl Into<String>,
        ipv4_address: impl Into<String>,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            human_readable_name: human_readable_name.into(),
            ipv4_address: ipv4_address.into(),
            peripherals: Vec::new(),
        }
    }

    /// Attach peripherals to be created together with the gateway
    pub fn with_peripherals(mut self, peripherals: Vec<Peripheral>) -> Self {
        self.peripherals = peripherals;
        self
    }

    /// Build the API view from a stored row and its peripherals
    pub fn from_record(record: GatewayRecord, peripherals: Vec<Peripheral>) -> Self {
        Self {
            serial_number: record.serial_number,
            human_readable_name: record.human_readable_name,
            ipv4_address: record.ipv4_address,
            peripherals,
        }
    }

    /// The persistable part of this gateway
    pub fn record(&self) -> GatewayRecord {
        GatewayRecord {
            serial_number: self.serial_number.clone(),
            human_readable_name: self.human_readable_name.clone(),
            ipv4_address: self.ipv4_address.clone(),
        }
    }
}
