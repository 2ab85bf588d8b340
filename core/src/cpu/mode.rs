//! Operation-mode bit toggles (spec.md §3, §4.3): six zero-argument
//! opcodes, each setting or clearing one of the three `OM` bits.

use super::{Cpu, StepOutcome, OM_A0_VALUE_TYPE, OM_ADDRESSING_MODE, OM_COMPATIBILITY_MODE};
use crate::bus::Bus;

pub(super) fn op_a0a(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.om.0 &= !OM_A0_VALUE_TYPE;
    StepOutcome::Continue
}

pub(super) fn op_a0v(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.om.0 |= OM_A0_VALUE_TYPE;
    StepOutcome::Continue
}

pub(super) fn op_aram(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.om.0 &= !OM_ADDRESSING_MODE;
    StepOutcome::Continue
}

pub(super) fn op_asta(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.om.0 |= OM_ADDRESSING_MODE;
    StepOutcome::Continue
}

/// `Comp`: bit 2 ← 0 — operate on raw `A0` (spec.md §3).
pub(super) fn op_comp(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.om.0 &= !OM_COMPATIBILITY_MODE;
    StepOutcome::Continue
}

/// `Ext`: bit 2 ← 1 — operate on resolved `V0`.
pub(super) fn op_ext(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.om.0 |= OM_COMPATIBILITY_MODE;
    StepOutcome::Continue
}
