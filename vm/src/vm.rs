//! The VM orchestrator: wires RAM and peripherals onto a bus behind one
//! CPU, and drives the fetch/decode/execute cycle either flat-out or
//! throttled to a fixed frequency (spec.md §4.5).
//!
//! Grounded on the teacher's `machines::Simple6502System`, which wires a
//! `Cpu` to a `Bus` of fixed devices at construction; generalized here to
//! take an arbitrary peripheral list, since this system has no fixed
//! hardware memory map.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use accvm_core::bus::{AddressRange, Bus, Slave};
use accvm_core::cpu::{self, Cpu, StepOutcome, SW_BREAKPOINT, SW_HALT, SW_INVALID_INSTRUCTION};
use accvm_core::numeric::{Address, Cell};

use crate::error::{LoadError, RunError};

/// Result of a normal [`VM::run`] exit (spec.md §7): either a reserved Halt,
/// or a user-defined SW-interrupt code surfaced as data to the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Halted,
    Interrupted(Cell),
}

pub struct VM {
    bus: Bus,
    cpu: Cpu,
    ram_size: usize,
}

impl VM {
    /// Attaches RAM at `[0, ram_size)`, then each `(size, device)` in
    /// `peripherals` back to back starting right after RAM, in declaration
    /// order (spec.md §4.5).
    pub fn new(ram_size: usize, peripherals: Vec<(usize, Box<dyn Slave>)>) -> Self {
        let mut bus = Bus::new();
        bus.attach(
            AddressRange::new(Address(0), Address(ram_size as u16)),
            Box::new(accvm_core::ram::Ram::new(ram_size)),
        );

        let mut next = ram_size as u16;
        for (size, device) in peripherals {
            let end = next.wrapping_add(size as u16);
            bus.attach(AddressRange::new(Address(next), Address(end)), device);
            next = end;
        }

        VM {
            bus,
            cpu: Cpu::new(),
            ram_size,
        }
    }

    /// Writes `image` into RAM starting at address 0. Rejects images larger
    /// than the attached RAM (spec.md §4.5).
    pub fn load_program(&mut self, image: &[Cell]) -> Result<(), LoadError> {
        if image.len() > self.ram_size {
            return Err(LoadError::TooLarge {
                len: image.len(),
                capacity: self.ram_size,
            });
        }
        for (offset, &cell) in image.iter().enumerate() {
            self.bus
                .write(Address(offset as u16), cell)
                .expect("program image was already checked against RAM capacity");
        }
        Ok(())
    }

    /// Zeroes CPU registers and the RAM image (spec.md §3).
    pub fn reset(&mut self) {
        self.cpu.reset();
        for addr in 0..self.ram_size as u16 {
            self.bus
                .write(Address(addr), Cell::ZERO)
                .expect("ram_size addresses are always within the attached RAM range");
        }
    }

    /// Read-through for test inspection: `vm.read(addr)` is `bus[addr]`
    /// (spec.md §4.5).
    pub fn read(&mut self, addr: Address) -> Cell {
        self.bus.read(addr).expect("test inspection address out of range")
    }

    /// Runs the CPU to completion. With no `frequency`, advances as fast as
    /// possible; with one, throttles to one micro-step per period and warns
    /// (non-fatally) when a step overruns its budget. A clock carrier
    /// thread runs for the duration of the call, raising the top IRQ level
    /// once a second, and is always joined before returning (spec.md §4.5,
    /// §5).
    pub fn run(&mut self, frequency: Option<f64>) -> Result<RunOutcome, RunError> {
        let liveness = Arc::new(AtomicBool::new(true));
        let clock = self.spawn_clock(Arc::clone(&liveness));

        let outcome = self.drive(frequency);

        liveness.store(false, Ordering::SeqCst);
        clock.join().expect("clock carrier thread panicked");

        outcome
    }

    fn spawn_clock(&self, liveness: Arc<AtomicBool>) -> thread::JoinHandle<()> {
        let latch = self.cpu.irq_latch();
        let top_level = self.cpu.irq_levels().saturating_sub(1);
        thread::spawn(move || {
            while liveness.load(Ordering::SeqCst) {
                thread::sleep(Duration::from_secs(1));
                if liveness.load(Ordering::SeqCst) {
                    cpu::raise_irq_on_latch(&latch, top_level);
                }
            }
        })
    }

    fn drive(&mut self, frequency: Option<f64>) -> Result<RunOutcome, RunError> {
        let period = frequency.map(|hz| Duration::from_nanos((1_000_000_000.0 / hz) as u64));

        loop {
            let step_started = Instant::now();
            let outcome = self.cpu.step(&mut self.bus);

            if let Some(period) = period {
                let elapsed = step_started.elapsed();
                if elapsed < period {
                    thread::sleep(period - elapsed);
                } else if elapsed > period {
                    let effective_hz = 1_000_000_000.0 / elapsed.as_nanos() as f64;
                    log::warn!("throttling to {effective_hz:.1} Hz, below the requested {hz:.1} Hz", hz = 1_000_000_000.0 / period.as_nanos() as f64);
                }
            }

            match outcome {
                StepOutcome::Continue => continue,
                StepOutcome::Fault(fault) => return Err(RunError::Bus(fault)),
                StepOutcome::SwInterrupt(code) => match code {
                    SW_HALT => return Ok(RunOutcome::Halted),
                    SW_BREAKPOINT => {
                        log::info!("breakpoint\n{}{}", self.cpu, self.dump_ram());
                        continue;
                    }
                    SW_INVALID_INSTRUCTION => return Err(RunError::InvalidInstruction),
                    other => return Ok(RunOutcome::Interrupted(other)),
                },
            }
        }
    }

    /// A compact hex dump of RAM for the `Breakpoint` state printout
    /// (spec.md §4.5). Composed by reading through the bus rather than
    /// delegating to `Ram`'s own `Display`, since RAM lives behind the bus
    /// as a boxed `Slave` once attached and the VM keeps no direct handle
    /// to it.
    fn dump_ram(&mut self) -> String {
        let mut text = format!("RAM({} cells)\n", self.ram_size);
        for row_start in (0..self.ram_size).step_by(16) {
            text.push_str(&format!("  {row_start:06x}: "));
            for addr in row_start..(row_start + 16).min(self.ram_size) {
                let cell = self.bus.read(Address(addr as u16)).expect("ram_size addresses are in range");
                text.push_str(&format!("{:04x} ", cell.0 as u16));
            }
            text.push('\n');
        }
        text
    }
}
