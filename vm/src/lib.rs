//! Orchestrator crate: wires a CPU and bus into a runnable machine, with a
//! clock carrier thread and a thin CLI front-end (`bin/accvm.rs`).

mod error;
mod vm;

pub use accvm_core::bus::Slave;
pub use accvm_core::numeric::{Address, Cell};
pub use error::{LoadError, RunError};
pub use vm::{RunOutcome, VM};
