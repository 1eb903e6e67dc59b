//! Domain error taxonomy shared by both services

use thiserror::Error;

use crate::models::PeripheralUid;

/// Resource name used in gateway error messages
pub const GATEWAY: &str = "Gateway";
/// Resource name used in peripheral error messages
pub const PERIPHERAL: &str = "PeripheralDevice";

const SERIAL_NUMBER: &str = "serial number";
const UID: &str = "UID";
const IPV4_ADDRESS: &str = "Ipv4 Address";

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised by repositories and domain services
///
/// Every variant carries enough context (resource, field, offending value)
/// to build a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Resource absent by identifier
    #[error("{resource} not found with {field} : '{value}'")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// Identifier collision on create
    #[error("{resource} with {field} : '{value}', already exists.")]
    DuplicateId {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// IPv4 address already used by a gateway
    #[error("{resource} with {field} : '{value}', already exists.")]
    DuplicateIpv4 {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// IPv4 address is not a dotted quad
    #[error("{resource} not valid with {field} : '{value}'")]
    InvalidIpv4 {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// Required field missing or empty
    #[error("Action {action} is not possible in {resource} . Review the introduced data.")]
    BlankFields {
        action: &'static str,
        resource: &'static str,
    },

    /// Gateway already holds its maximum number of peripherals
    #[error("{resource} with {field} : '{value}', does not allow more peripherals devices.")]
    CapacityExceeded {
        resource: &'static str,
        field: &'static str,
        value: String,
        limit: usize,
    },

    /// Peripheral is not owned by the targeted gateway
    #[error("{owner} with {owner_field} : '{owner_value}', is not owner of {property} with {property_field} : {property_value}. ")]
    NotOwner {
        owner: &'static str,
        owner_field: &'static str,
        owner_value: String,
        property: &'static str,
        property_field: &'static str,
        property_value: String,
    },

    /// Repository failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn gateway_not_found(serial_number: impl Into<String>) -> Self {
        Self::NotFound {
            resource: GATEWAY,
            field: SERIAL_NUMBER,
            value: serial_number.into(),
        }
    }

    pub fn peripheral_not_found(uid: PeripheralUid) -> Self {
        Self::NotFound {
            resource: PERIPHERAL,
            field: UID,
            value: uid.to_string(),
        }
    }

    pub fn duplicate_gateway(serial_number: impl Into<String>) -> Self {
        Self::DuplicateId {
            resource: GATEWAY,
            field: SERIAL_NUMBER,
            value: serial_number.into(),
        }
    }

    pub fn duplicate_peripheral(uid: PeripheralUid) -> Self {
        Self::DuplicateId {
            resource: PERIPHERAL,
            field: UID,
            value: uid.to_string(),
        }
    }

    pub fn invalid_ipv4(address: impl Into<String>) -> Self {
        Self::InvalidIpv4 {
            resource: GATEWAY,
            field: IPV4_ADDRESS,
            value: address.into(),
        }
    }

    pub fn duplicate_ipv4(address: impl Into<String>) -> Self {
        Self::DuplicateIpv4 {
            resource: GATEWAY,
            field: IPV4_ADDRESS,
            value: address.into(),
        }
    }

    pub fn capacity_exceeded(serial_number: impl Into<String>, limit: usize) -> Self {
        Self::CapacityExceeded {
            resource: GATEWAY,
            field: SERIAL_NUMBER,
            value: serial_number.into(),
            limit,
        }
    }

    pub fn not_owner(serial_number: impl Into<String>, uid: PeripheralUid) -> Self {
        Self::NotOwner {
            owner: GATEWAY,
            owner_field: SERIAL_NUMBER,
            owner_value: serial_number.into(),
            property: PERIPHERAL,
            property_field: UID,
            property_value: uid.to_string(),
        }
    }

    pub fn blank_fields(action: &'static str, resource: &'static str) -> Self {
        Self::BlankFields { action, resource }
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::NotFound { .. } => 404,
            DomainError::DuplicateId { .. } => 409,
            DomainError::DuplicateIpv4 { .. } => 409,
            DomainError::InvalidIpv4 { .. } => 406,
            DomainError::BlankFields { .. } => 406,
            DomainError::CapacityExceeded { .. } => 406,
            DomainError::NotOwner { .. } => 424,
            DomainError::Storage(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        assert_eq!(
            DomainError::gateway_not_found("RECM12345M8C").to_string(),
            "Gateway not found with serial number : 'RECM12345M8C'"
        );
        assert_eq!(
            DomainError::duplicate_peripheral(20013).to_string(),
            "PeripheralDevice with UID : '20013', already exists."
        );
        assert_eq!(
            DomainError::invalid_ipv4("300.1.1.1").to_string(),
            "Gateway not valid with Ipv4 Address : '300.1.1.1'"
        );
        assert_eq!(
            DomainError::blank_fields("Create", "Peripheral device").to_string(),
            "Action Create is not possible in Peripheral device . Review the introduced data."
        );
        assert_eq!(
            DomainError::not_owner("GW-1", 7).to_string(),
            "Gateway with serial number : 'GW-1', is not owner of PeripheralDevice with UID : 7. "
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(DomainError::gateway_not_found("x").status_code(), 404);
        assert_eq!(DomainError::duplicate_gateway("x").status_code(), 409);
        assert_eq!(DomainError::duplicate_ipv4("x").status_code(), 409);
        assert_eq!(DomainError::invalid_ipv4("x").status_code(), 406);
        assert_eq!(DomainError::blank_fields("a", "b").status_code(), 406);
        assert_eq!(DomainError::capacity_exceeded("x", 10).status_code(), 406);
        assert_eq!(DomainError::not_owner("x", 1).status_code(), 424);
        assert_eq!(DomainError::Storage("disk".into()).status_code(), 500);
    }
}
