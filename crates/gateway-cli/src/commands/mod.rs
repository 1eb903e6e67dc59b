//! Command implementations for gwctl

pub mod gateways;
pub mod peripherals;
