//! Control flow, interrupts, and the hardware-interrupt table base (spec.md
//! §4.3, §5).

use super::{Cpu, StepOutcome};
use crate::bus::Bus;

pub(super) fn op_int(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    StepOutcome::SwInterrupt(cpu.operand())
}

pub(super) fn op_jmp(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ia = cpu.compat_address();
    StepOutcome::Continue
}

pub(super) fn op_jif(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    if cpu.ac.is_true() {
        cpu.ia = cpu.compat_address();
    }
    StepOutcome::Continue
}

/// Sets the base address of the hardware-interrupt handler table (spec.md
/// §5). `hih_base + level` holds the entry address for each IRQ level.
pub(super) fn op_hih(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.hih_base = cpu.operand().as_address();
    StepOutcome::Continue
}

/// Return from a hardware interrupt: pop the saved `IA` the entry sequence
/// pushed in [`Cpu::enter_hardware_interrupt`].
pub(super) fn op_ihr(cpu: &mut Cpu, bus: &mut Bus) -> StepOutcome {
    cpu.sp = cpu.sp.wrapping_sub(1);
    match bus.read(cpu.sp) {
        Ok(value) => {
            cpu.ia = value.as_address();
            StepOutcome::Continue
        }
        Err(fault) => StepOutcome::Fault(fault),
    }
}

pub(super) fn op_noop(_cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    StepOutcome::Continue
}
