//! Gateway and Peripheral models

mod gateway;
mod peripheral;

pub use gateway::*;
pub use peripheral::*;
