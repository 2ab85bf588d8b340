//! Address-range-routed bus: attach RAM and peripherals, read/write through
//! a single uniform interface (spec.md §4.1).
//!
//! Generalizes the teacher's `Bus` trait (`core/src/core/bus.rs`), which a
//! whole arcade system implements directly against a hand-written `match` on
//! fixed address windows, into a concrete aggregator that routes by an
//! attach-ordered list of ranges. This system has no fixed hardware memory
//! map — peripherals are wired at `VM::new` time — so routing has to be
//! data, not code.

mod range;
mod slave;

pub use range::AddressRange;
pub use slave::Slave;

use crate::error::Fault;
use crate::numeric::{Address, Cell};

/// An ordered list of `(range, slave)` bindings. First containing range
/// wins; ranges are not checked for overlap at attach time (spec.md §9).
#[derive(Default)]
pub struct Bus {
    bindings: Vec<(AddressRange, Box<dyn Slave>)>,
}

impl Bus {
    pub fn new() -> Self {
        Bus {
            bindings: Vec::new(),
        }
    }

    /// Bind `slave` to answer for every address in `range`.
    pub fn attach(&mut self, range: AddressRange, slave: Box<dyn Slave>) {
        self.bindings.push((range, slave));
    }

    pub fn read(&mut self, addr: Address) -> Result<Cell, Fault> {
        for (range, slave) in &mut self.bindings {
            if range.contains(addr) {
                let local = addr.wrapping_sub(range.start().0);
                return slave.read(local).map_err(Fault::from);
            }
        }
        Err(Fault::Bus(addr))
    }

    pub fn write(&mut self, addr: Address, value: Cell) -> Result<(), Fault> {
        for (range, slave) in &mut self.bindings {
            if range.contains(addr) {
                let local = addr.wrapping_sub(range.start().0);
                return slave.write(local, value).map_err(Fault::from);
            }
        }
        Err(Fault::Bus(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ram::Ram;

    #[test]
    fn routes_to_first_matching_range() {
        let mut bus = Bus::new();
        bus.attach(AddressRange::new(Address(0), Address(4)), Box::new(Ram::new(4)));
        bus.attach(AddressRange::new(Address(4), Address(8)), Box::new(Ram::new(4)));

        bus.write(Address(1), Cell(11)).unwrap();
        bus.write(Address(5), Cell(55)).unwrap();

        assert_eq!(bus.read(Address(1)).unwrap(), Cell(11));
        assert_eq!(bus.read(Address(5)).unwrap(), Cell(55));
    }

    #[test]
    fn local_offset_is_address_minus_range_start() {
        let mut bus = Bus::new();
        bus.attach(AddressRange::new(Address(10), Address(14)), Box::new(Ram::new(4)));
        bus.write(Address(12), Cell(7)).unwrap();
        assert_eq!(bus.read(Address(12)).unwrap(), Cell(7));
    }

    #[test]
    fn unmapped_address_is_a_bus_fault() {
        let mut bus = Bus::new();
        bus.attach(AddressRange::new(Address(0), Address(4)), Box::new(Ram::new(4)));
        assert_eq!(bus.read(Address(99)), Err(Fault::Bus(Address(99))));
        assert_eq!(
            bus.write(Address(99), Cell(1)),
            Err(Fault::Bus(Address(99)))
        );
    }

    #[test]
    fn first_attached_overlapping_range_wins() {
        let mut bus = Bus::new();
        bus.attach(AddressRange::new(Address(0), Address(8)), Box::new(Ram::new(8)));
        bus.attach(AddressRange::new(Address(4), Address(8)), Box::new(Ram::new(4)));
        bus.write(Address(5), Cell(42)).unwrap();
        // Both ranges contain 5; the first attached (the 8-byte RAM) wins.
        assert_eq!(bus.read(Address(5)).unwrap(), Cell(42));
    }
}
