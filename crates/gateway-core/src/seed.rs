//! Initial data loaded at startup
//!
//! A seed file is JSON shaped like `{ "gateways": [...], "peripherals": [...] }`.
//! Records go through the domain services, so everything the API would reject
//! is rejected here too. Rejected records are logged and skipped.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Gateway, Peripheral};
use crate::services::{GatewayService, PeripheralService};

/// Errors reading a seed file
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gateways and standalone peripherals to create
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub gateways: Vec<Gateway>,
    #[serde(default)]
    pub peripherals: Vec<Peripheral>,
}

/// Outcome of applying seed data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub gateways: usize,
    pub peripherals: usize,
    pub skipped: usize,
}

impl SeedData {
    pub fn from_json_str(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Create every record, gateways first
    ///
    /// Peripherals nested in a gateway count towards `peripherals` in the
    /// report.
    pub async fn apply(
        self,
        gateways: &GatewayService,
        peripherals: &PeripheralService,
    ) -> SeedReport {
        let mut report = SeedReport::default();

        for gateway in self.gateways {
            let serial_number = gateway.serial_number.clone();
            match gateways.create_gateway(gateway).await {
                Ok(created) => {
                    report.gateways += 1;
                    report.peripherals += created.peripherals.len();
                }
                Err(e) => {
                    report.skipped += 1;
                    warn!(serial_number = %serial_number, error = %e, "Skipping seed gateway");
                }
            }
        }

        for peripheral in self.peripherals {
            let uid = peripheral.uid;
            match peripherals.create_peripheral(peripheral).await {
                Ok(_) => report.peripherals += 1,
                Err(e) => {
                    report.skipped += 1;
                    warn!(uid, error = %e, "Skipping seed peripheral");
                }
            }
        }

        info!(
            gateways = report.gateways,
            peripherals = report.peripherals,
            skipped = report.skipped,
            "Seed data applied"
        );
        report
    }
}
