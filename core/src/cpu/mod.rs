//! The single-accumulator CPU: architectural state, the phase-stepped
//! fetch/decode/execute cycle, and the software/hardware interrupt
//! protocols (spec.md §3, §4.3).
//!
//! Shaped after the teacher's cycle-stepped `cpu::m6502` (`ExecState` driven
//! one micro-step per `execute_cycle` call), generalized per spec.md §9 from
//! a per-opcode hardware-cycle counter into an explicit five-phase state
//! machine, since this ISA's timing model is "one tick per architectural
//! phase", not "N hardware cycles per opcode".

mod alu;
mod control;
mod dispatch;
mod irq;
mod load_store;
mod mode;
mod stack;

pub use irq::{raise as raise_irq_on_latch, IRQ_LEVELS};

use crate::bus::Bus;
use crate::error::Fault;
use crate::numeric::{Address, Cell};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Operation-mode bits (spec.md §3).
pub(crate) const OM_A0_VALUE_TYPE: i16 = 1 << 0;
pub(crate) const OM_ADDRESSING_MODE: i16 = 1 << 1;
pub(crate) const OM_COMPATIBILITY_MODE: i16 = 1 << 2;

/// Reserved software-interrupt codes (spec.md §4.3).
pub const SW_HALT: Cell = Cell(0);
pub const SW_INVALID_INSTRUCTION: Cell = Cell(1);
pub const SW_BREAKPOINT: Cell = Cell(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    FetchOpcode,
    Decode,
    FetchOperand,
    ResolveValue,
    Execute,
}

/// Outcome of a single [`Cpu::step`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The micro-step completed; the instruction (or phase) isn't finished.
    Continue,
    /// A software interrupt was raised (`Int`, a decode failure, or the
    /// CPU's own fault detection). Carries the interrupt code.
    SwInterrupt(Cell),
    /// A bus or device fault interrupted execution.
    Fault(Fault),
}

type OpFn = fn(&mut Cpu, &mut Bus) -> StepOutcome;

pub struct Cpu {
    pub ia: Address,
    pub oc: Cell,
    pub om: Cell,
    pub a0: Cell,
    pub v0: Cell,
    pub ac: Cell,
    pub sp: Address,

    hih_base: Address,
    phase: Phase,
    pending_irq: Arc<AtomicU8>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Cpu {
            ia: Address(0),
            oc: Cell::ZERO,
            om: Cell::ZERO,
            a0: Cell::ZERO,
            v0: Cell::ZERO,
            ac: Cell::ZERO,
            sp: Address(0),
            hih_base: Address(0),
            phase: Phase::FetchOpcode,
            pending_irq: Arc::new(AtomicU8::new(0)),
        }
    }

    /// Zero every register and restart the phase machine. Does not touch
    /// RAM; the VM clears RAM separately (spec.md §3).
    pub fn reset(&mut self) {
        self.ia = Address(0);
        self.oc = Cell::ZERO;
        self.om = Cell::ZERO;
        self.a0 = Cell::ZERO;
        self.v0 = Cell::ZERO;
        self.ac = Cell::ZERO;
        self.sp = Address(0);
        self.hih_base = Address(0);
        self.phase = Phase::FetchOpcode;
        self.pending_irq.store(0, Ordering::SeqCst);
    }

    /// Number of hardware-interrupt levels this CPU supports. The highest
    /// level is reserved for the clock (spec.md §4.3).
    pub fn irq_levels(&self) -> u8 {
        IRQ_LEVELS
    }

    /// A clone of the shared pending-IRQ latch, handed to the clock carrier
    /// so it can raise interrupts without taking `&mut Cpu` (spec.md §5: the
    /// clock carrier touches only the IRQ latch).
    pub fn irq_latch(&self) -> Arc<AtomicU8> {
        Arc::clone(&self.pending_irq)
    }

    /// Raise a hardware interrupt at `level` directly (for single-threaded
    /// callers/tests that don't go through [`Cpu::irq_latch`]).
    pub fn raise_irq(&self, level: u8) {
        irq::raise(&self.pending_irq, level);
    }

    /// Advance exactly one micro-step of the fetch/decode/execute cycle
    /// (spec.md §4.3). This is the yield point an external driver
    /// interleaves against the clock and interrupt injection.
    pub fn step(&mut self, bus: &mut Bus) -> StepOutcome {
        match self.phase {
            Phase::FetchOpcode => {
                if let Some(level) = irq::take_highest(&self.pending_irq) {
                    return match self.enter_hardware_interrupt(level, bus) {
                        Ok(()) => StepOutcome::Continue,
                        Err(fault) => StepOutcome::Fault(fault),
                    };
                }
                match bus.read(self.ia) {
                    Ok(opcode) => {
                        self.oc = opcode;
                        self.ia = self.ia.wrapping_add(1);
                        self.phase = Phase::Decode;
                        StepOutcome::Continue
                    }
                    Err(fault) => StepOutcome::Fault(fault),
                }
            }
            Phase::Decode => match dispatch::decode(self.oc) {
                Some((_, arg_count)) => {
                    self.phase = if arg_count > 0 {
                        Phase::FetchOperand
                    } else {
                        Phase::Execute
                    };
                    StepOutcome::Continue
                }
                None => {
                    self.phase = Phase::FetchOpcode;
                    StepOutcome::SwInterrupt(SW_INVALID_INSTRUCTION)
                }
            },
            Phase::FetchOperand => match bus.read(self.ia) {
                Ok(arg) => {
                    self.a0 = arg;
                    self.ia = self.ia.wrapping_add(1);
                    self.phase = Phase::ResolveValue;
                    StepOutcome::Continue
                }
                Err(fault) => {
                    self.phase = Phase::FetchOpcode;
                    StepOutcome::Fault(fault)
                }
            },
            Phase::ResolveValue => match self.resolve(bus, self.a0) {
                Ok(value) => {
                    self.v0 = value;
                    self.phase = Phase::Execute;
                    StepOutcome::Continue
                }
                Err(fault) => {
                    self.phase = Phase::FetchOpcode;
                    StepOutcome::Fault(fault)
                }
            },
            Phase::Execute => {
                self.phase = Phase::FetchOpcode;
                let (handler, _) = dispatch::decode(self.oc)
                    .expect("opcode was already validated in the Decode phase");
                handler(self, bus)
            }
        }
    }

    /// Operand resolution (spec.md §4.3 "Operand resolution"). Honors bit0
    /// (literal vs address) and bit1 (absolute vs stack-relative); always
    /// runs regardless of compatibility mode, since `V0` must be valid by
    /// the time `Execute` reads it even for instructions that ignore it.
    fn resolve(&self, bus: &mut Bus, arg: Cell) -> Result<Cell, Fault> {
        if self.om.0 & OM_A0_VALUE_TYPE != 0 {
            return Ok(arg);
        }
        bus.read(self.resolved_address())
    }

    /// The address `A0`/addressing-mode bits point to: absolute, or
    /// stack-relative with top-of-stack at offset 0. Underflow (SP <= A0)
    /// wraps; spec.md §9 leaves this undefined but not fatal.
    fn resolved_address(&self) -> Address {
        if self.om.0 & OM_ADDRESSING_MODE != 0 {
            self.sp.wrapping_sub((self.a0.0 as u16).wrapping_add(1))
        } else {
            Address(self.a0.0 as u16)
        }
    }

    /// `true` when OM bit 2 selects "extended" (operate on resolved `V0`);
    /// `false` is "compatibility" (operate on raw `A0`) — spec.md §3.
    fn extended_mode(&self) -> bool {
        self.om.0 & OM_COMPATIBILITY_MODE != 0
    }

    /// The compat/ext operand choice for the handful of instructions that
    /// document one (`Int`, `Hih`; spec.md §4.3's opcode table): raw `A0`
    /// in compatibility mode, fully resolved `V0` in extended mode. Every
    /// other 1-argument instruction (`Ld`, `Add`, `Stk`, …) always reads
    /// `V0` regardless of this bit — see each handler.
    fn operand(&self) -> Cell {
        if self.extended_mode() { self.v0 } else { self.a0 }
    }

    /// The compat/ext address choice for `St`, `Jmp`, `Jif` (spec.md §4.3):
    /// `A0` taken as a literal address in compatibility mode, or `V0` taken
    /// as an address in extended mode — a second, distinct level of
    /// indirection from the address `V0` was itself read from.
    fn compat_address(&self) -> Address {
        if self.extended_mode() {
            Address(self.v0.0 as u16)
        } else {
            Address(self.a0.0 as u16)
        }
    }

    fn enter_hardware_interrupt(&mut self, level: u8, bus: &mut Bus) -> Result<(), Fault> {
        bus.write(self.sp, self.ia.as_cell())?;
        self.sp = self.sp.wrapping_add(1);
        let handler = bus.read(self.hih_base.wrapping_add(level as u16))?;
        self.ia = handler.as_address();
        Ok(())
    }
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CPU:")?;
        writeln!(f, "  IA: {}", self.ia)?;
        writeln!(f, "  OC: {}", self.oc)?;
        writeln!(f, "  OM: {}", self.om)?;
        writeln!(f, "  A0: {}", self.a0)?;
        writeln!(f, "  V0: {}", self.v0)?;
        writeln!(f, "  AC: {}", self.ac)?;
        writeln!(f, "  SP: {}", self.sp)
    }
}
