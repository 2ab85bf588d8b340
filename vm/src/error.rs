//! Runtime error taxonomy for [`crate::VM::run`] and [`crate::VM::load_program`]
//! (spec.md §7): the genuinely fatal-to-`run` conditions, as opposed to
//! `RunOutcome::Interrupted`, which carries a user-defined SW-interrupt code
//! back as data rather than as an error.

use accvm_core::error::Fault;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error(transparent)]
    Bus(#[from] Fault),

    #[error("invalid instruction")]
    InvalidInstruction,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("program image of {len} cells exceeds RAM capacity of {capacity} cells")]
    TooLarge { len: usize, capacity: usize },
}
