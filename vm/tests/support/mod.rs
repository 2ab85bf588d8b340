//! Peripheral fixtures used only by integration tests (spec.md §1, §6:
//! concrete peripherals are out of scope for the library surface). Grounded
//! 1:1 on `original_source/tests/test_basic_peripherals.py`'s
//! `ArgvPeripheral`, `TupleOutputPeripheral`, and
//! `ProfiledQueuesOutputPeripheral`.
//!
//! `TupleSink`/`ProfiledQueueSink` hold their recorded values behind a
//! shared `Arc<Mutex<_>>` so a test can keep a handle after the device
//! itself is boxed and moved into the VM's bus.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use accvm_core::bus::Slave;
use accvm_core::error::DeviceFault;
use accvm_core::numeric::{Address, Cell};

/// Read-only device exposing a fixed argument list, one Cell per index.
pub struct ArgvSource {
    args: Vec<Cell>,
}

impl ArgvSource {
    pub fn new(args: &[i16]) -> Self {
        ArgvSource {
            args: args.iter().map(|&v| Cell(v)).collect(),
        }
    }
}

impl Slave for ArgvSource {
    fn read(&mut self, local_addr: Address) -> Result<Cell, DeviceFault> {
        self.args
            .get(local_addr.as_usize())
            .copied()
            .ok_or_else(|| DeviceFault::new(local_addr, "argv index out of range"))
    }

    fn write(&mut self, local_addr: Address, _value: Cell) -> Result<(), DeviceFault> {
        Err(DeviceFault::new(local_addr, "argv source is read-only"))
    }
}

/// Write-only device recording the last value written at each address.
/// Reads always answer zero, matching the original fixture.
#[derive(Clone)]
pub struct TupleSink {
    cells: Arc<Mutex<Vec<Cell>>>,
}

impl TupleSink {
    pub fn new(size: usize) -> Self {
        TupleSink {
            cells: Arc::new(Mutex::new(vec![Cell::ZERO; size])),
        }
    }

    pub fn values(&self) -> Vec<Cell> {
        self.cells.lock().unwrap().clone()
    }
}

impl Slave for TupleSink {
    fn read(&mut self, _local_addr: Address) -> Result<Cell, DeviceFault> {
        Ok(Cell::ZERO)
    }

    fn write(&mut self, local_addr: Address, value: Cell) -> Result<(), DeviceFault> {
        let index = local_addr.as_usize();
        let mut cells = self.cells.lock().unwrap();
        let slot = cells
            .get_mut(index)
            .ok_or_else(|| DeviceFault::new(local_addr, "write past sink capacity"))?;
        *slot = value;
        Ok(())
    }
}

/// Write-only device recording every value written to each address as a
/// `(timestamp_ns, value)` pair, for the clock-IRQ profiling scenario.
#[derive(Clone)]
pub struct ProfiledQueueSink {
    queues: Arc<Mutex<Vec<Vec<(u128, Cell)>>>>,
    started: Instant,
}

impl ProfiledQueueSink {
    pub fn new(num_queues: usize) -> Self {
        ProfiledQueueSink {
            queues: Arc::new(Mutex::new(vec![Vec::new(); num_queues])),
            started: Instant::now(),
        }
    }

    pub fn queue(&self, index: usize) -> Vec<(u128, Cell)> {
        self.queues.lock().unwrap()[index].clone()
    }
}

impl Slave for ProfiledQueueSink {
    fn read(&mut self, _local_addr: Address) -> Result<Cell, DeviceFault> {
        Ok(Cell::ZERO)
    }

    fn write(&mut self, local_addr: Address, value: Cell) -> Result<(), DeviceFault> {
        let mut queues = self.queues.lock().unwrap();
        let index = local_addr.as_usize();
        let queue = queues
            .get_mut(index)
            .ok_or_else(|| DeviceFault::new(local_addr, "write past sink capacity"))?;
        queue.push((self.started.elapsed().as_nanos(), value));
        Ok(())
    }
}
