//! HTTP request handlers

pub mod gateways;
pub mod peripherals;
