//! `Ld`/`St`: the only two opcodes that move a value between `AC` and bus
//! memory (spec.md §4.3). `Ld` always reads the fully resolved `V0`; `St`
//! is one of the four instructions with a documented compat/ext address
//! choice (see [`Cpu::compat_address`]).

use super::{Cpu, StepOutcome};
use crate::bus::Bus;

pub(super) fn op_ld(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = cpu.v0;
    StepOutcome::Continue
}

pub(super) fn op_st(cpu: &mut Cpu, bus: &mut Bus) -> StepOutcome {
    match bus.write(cpu.compat_address(), cpu.ac) {
        Ok(()) => StepOutcome::Continue,
        Err(fault) => StepOutcome::Fault(fault),
    }
}
