//! Zero-initialized linear cell store, attached to the bus at address 0
//! (spec.md §4.2). Shaped after the teacher's `device::CmosRam`: a plain
//! fixed-size backing store with `new`/`clear`, wired into the bus through
//! the shared `Slave` trait rather than being called directly.

use crate::bus::Slave;
use crate::error::DeviceFault;
use crate::numeric::{Address, Cell};
use std::fmt;

pub struct Ram {
    cells: Vec<Cell>,
}

impl Ram {
    pub fn new(capacity: usize) -> Self {
        let mut ram = Ram {
            cells: Vec::with_capacity(capacity),
        };
        ram.cells.resize(capacity, Cell::ZERO);
        ram
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Zero every cell. Implied by `new()`.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Cell::ZERO);
    }

    /// Write `image` starting at address 0. Caller (the VM) is responsible
    /// for checking `image.len() <= capacity()` ahead of time.
    pub fn load(&mut self, image: &[Cell]) {
        self.cells[..image.len()].copy_from_slice(image);
    }

    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }
}

impl Slave for Ram {
    fn read(&mut self, local_addr: Address) -> Result<Cell, DeviceFault> {
        let index = local_addr.as_usize();
        assert!(
            index < self.cells.len(),
            "RAM read out of bounds: {local_addr} (capacity {})",
            self.cells.len()
        );
        Ok(self.cells[index])
    }

    fn write(&mut self, local_addr: Address, value: Cell) -> Result<(), DeviceFault> {
        let index = local_addr.as_usize();
        assert!(
            index < self.cells.len(),
            "RAM write out of bounds: {local_addr} (capacity {})",
            self.cells.len()
        );
        self.cells[index] = value;
        Ok(())
    }
}

impl fmt::Display for Ram {
    /// A compact hex dump, 16 cells per line — for `Breakpoint` state
    /// printing (spec.md §4.5).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RAM({} cells)", self.cells.len())?;
        for (row, chunk) in self.cells.chunks(16).enumerate() {
            write!(f, "  {:06x}: ", row * 16)?;
            for cell in chunk {
                write!(f, "{:04x} ", cell.0 as u16)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
