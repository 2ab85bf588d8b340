//! Architectural core of the single-accumulator virtual machine: the bus,
//! RAM, and CPU. No I/O, no clock, no assembler — those live in sibling
//! crates built on top of this one.

pub mod bus;
pub mod cpu;
pub mod error;
pub mod numeric;
pub mod ram;

pub mod prelude {
    pub use crate::bus::{AddressRange, Bus, Slave};
    pub use crate::cpu::{Cpu, StepOutcome};
    pub use crate::error::{DeviceFault, Fault};
    pub use crate::numeric::{Address, Cell};
    pub use crate::ram::Ram;
}
