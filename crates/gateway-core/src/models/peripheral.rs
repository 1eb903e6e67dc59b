//! Peripheral models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Peripheral identifier. `0` means unset.
pub type PeripheralUid = i32;

/// A peripheral device, optionally owned by one gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peripheral {
    #[serde(default)]
    pub uid: PeripheralUid,
    #[serde(default)]
    pub vendor: String,
    /// Calendar date in `YYYY-MM-DD` form
    #[serde(default)]
    pub date_created: Option<NaiveDate>,
    /// Online/offline flag
    #[serde(default, alias = "statusPd")]
    pub status: bool,
    /// Serial number of the owning gateway. Never read from or written to JSON.
    #[serde(skip)]
    pub gateway_serial: Option<String>,
}

impl Peripheral {
    pub fn new(uid: PeripheralUid, vendor: impl Into<String>) -> Self {
        Self {
            uid,
            vendor: vendor.into(),
            ..Default::default()
        }
    }

    pub fn with_date_created(mut self, date: NaiveDate) -> Self {
        self.date_created = Some(date);
        self
    }

    pub fn with_status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    pub fn is_assigned(&self) -> bool {
        self.gateway_serial.is_some()
    }

    /// Whether this peripheral is owned by the gateway with `serial_number`
    pub fn is_owned_by(&self, serial_number: &str) -> bool {
        self.gateway_serial.as_deref() == Some(serial_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_peripheral_json_roundtrip_hides_owner() {
        let mut peripheral = Peripheral::new(20013, "ASUS")
            .with_date_created(NaiveDate::from_ymd_opt(2020, 1, 11).unwrap())
            .with_status(true);
        peripheral.gateway_serial = Some("RECM12345M8C".to_string());

        let value = serde_json::to_value(&peripheral).unwrap();
        assert_eq!(
            value,
            json!({
                "uid": 20013,
                "vendor": "ASUS",
                "dateCreated": "2020-01-11",
                "status": true
            })
        );

        let back: Peripheral = serde_json::from_value(value).unwrap();
        assert_eq!(back.gateway_serial, None);
        assert_eq!(back.uid, 20013);
    }

    #[test]
    fn test_peripheral_payload_defaults() {
        let peripheral: Peripheral = serde_json::from_value(json!({"statusPd": true})).unwrap();
        assert_eq!(peripheral.uid, 0);
        assert!(peripheral.vendor.is_empty());
        assert!(peripheral.date_created.is_none());
        assert!(peripheral.status);
    }

    #[test]
    fn test_ownership_helpers() {
        let mut peripheral = Peripheral::new(1, "HP");
        assert!(!peripheral.is_assigned());
        assert!(!peripheral.is_owned_by("GW-1"));

        peripheral.gateway_serial = Some("GW-1".to_string());
        assert!(peripheral.is_assigned());
        assert!(peripheral.is_owned_by("GW-1"));
        assert!(!peripheral.is_owned_by("GW-2"));
    }
}
