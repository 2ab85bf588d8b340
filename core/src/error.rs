//! Error taxonomy for the bus and its slaves (spec.md §7).

use crate::numeric::Address;
use thiserror::Error;

/// Raised by a [`crate::bus::Slave`] for a peripheral-defined failure, e.g.
/// a write to a read-only device. Propagates through the [`crate::bus::Bus`]
/// unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("device fault at local address {address}: {reason}")]
pub struct DeviceFault {
    pub address: Address,
    pub reason: String,
}

impl DeviceFault {
    pub fn new(address: Address, reason: impl Into<String>) -> Self {
        DeviceFault {
            address,
            reason: reason.into(),
        }
    }
}

/// Any fault surfaced by a bus access: no device attached at the address,
/// or a fault raised by the device that answered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("bus fault: no device attached at address {0}")]
    Bus(Address),

    #[error(transparent)]
    Device(#[from] DeviceFault),
}
