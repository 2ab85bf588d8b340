//! Arithmetic and boolean opcodes (spec.md §4.3). None of these document a
//! compatibility/extended distinction — they always read the fully
//! resolved `V0`, regardless of `OM.CompatibilityMode` — and leave the
//! result in `AC`.

use super::{Cpu, StepOutcome};
use crate::bus::Bus;
use crate::numeric::Cell;

pub(super) fn op_add(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = cpu.ac + cpu.v0;
    StepOutcome::Continue
}

pub(super) fn op_neg(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = -cpu.ac;
    StepOutcome::Continue
}

pub(super) fn op_mul(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = cpu.ac * cpu.v0;
    StepOutcome::Continue
}

pub(super) fn op_div(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = cpu.ac / cpu.v0;
    StepOutcome::Continue
}

pub(super) fn op_eq(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = Cell::from_bool(cpu.ac == cpu.v0);
    StepOutcome::Continue
}

pub(super) fn op_gt(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = Cell::from_bool(cpu.ac.0 > cpu.v0.0);
    StepOutcome::Continue
}

pub(super) fn op_not(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = Cell::from_bool(!cpu.ac.is_true());
    StepOutcome::Continue
}

pub(super) fn op_and(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = Cell::from_bool(cpu.ac.is_true() && cpu.v0.is_true());
    StepOutcome::Continue
}

pub(super) fn op_or(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = Cell::from_bool(cpu.ac.is_true() || cpu.v0.is_true());
    StepOutcome::Continue
}

pub(super) fn op_sqrt(cpu: &mut Cpu, _bus: &mut Bus) -> StepOutcome {
    cpu.ac = cpu.ac.isqrt();
    StepOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Bus;

    fn idle_bus() -> Bus {
        Bus::new()
    }

    #[test]
    fn add_wraps_like_cell_arithmetic() {
        let mut cpu = Cpu::new();
        let mut bus = idle_bus();
        cpu.ac = Cell(i16::MAX);
        cpu.v0 = Cell(1);
        op_add(&mut cpu, &mut bus);
        assert_eq!(cpu.ac, Cell(i16::MIN));
    }

    #[test]
    fn comparisons_normalize_to_zero_or_one() {
        let mut cpu = Cpu::new();
        let mut bus = idle_bus();
        cpu.ac = Cell(5);
        cpu.v0 = Cell(5);
        op_eq(&mut cpu, &mut bus);
        assert_eq!(cpu.ac, Cell::TRUE);

        cpu.ac = Cell(5);
        cpu.v0 = Cell(3);
        op_gt(&mut cpu, &mut bus);
        assert_eq!(cpu.ac, Cell::TRUE);

        cpu.ac = Cell(3);
        cpu.v0 = Cell(5);
        op_gt(&mut cpu, &mut bus);
        assert_eq!(cpu.ac, Cell::ZERO);
    }

    #[test]
    fn not_inverts_truthiness_not_bits() {
        let mut cpu = Cpu::new();
        let mut bus = idle_bus();
        cpu.ac = Cell(-7);
        op_not(&mut cpu, &mut bus);
        assert_eq!(cpu.ac, Cell::ZERO);
        op_not(&mut cpu, &mut bus);
        assert_eq!(cpu.ac, Cell::TRUE);
    }
}
