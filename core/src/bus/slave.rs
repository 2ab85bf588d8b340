use crate::error::DeviceFault;
use crate::numeric::{Address, Cell};

/// The minimal capability every bus-attached device implements: RAM, and
/// every peripheral (spec.md §4.1, §6). `local_addr` is already translated
/// to be relative to the device's own attach range.
pub trait Slave {
    fn read(&mut self, local_addr: Address) -> Result<Cell, DeviceFault>;
    fn write(&mut self, local_addr: Address, value: Cell) -> Result<(), DeviceFault>;
}
