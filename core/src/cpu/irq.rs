//! Hardware-interrupt latch: a single shared `AtomicU8` bitmask, one bit
//! per level, sampled only at the `FetchOpcode` phase boundary (spec.md §5).
//!
//! The highest level (`IRQ_LEVELS - 1`) is reserved for the clock, per the
//! four-entry handler table in the original integration tests.

use std::sync::atomic::{AtomicU8, Ordering};

pub const IRQ_LEVELS: u8 = 4;

/// Set `level`'s bit in the latch. Safe to call from any thread without a
/// `&mut Cpu` — this is the entire surface the clock carrier touches.
pub fn raise(latch: &AtomicU8, level: u8) {
    debug_assert!(level < IRQ_LEVELS, "IRQ level {level} out of range");
    latch.fetch_or(1 << level, Ordering::SeqCst);
}

/// Clear and return the highest pending level, if any. Highest level wins
/// when multiple are pending simultaneously.
pub fn take_highest(latch: &AtomicU8) -> Option<u8> {
    let mut current = latch.load(Ordering::SeqCst);
    loop {
        if current == 0 {
            return None;
        }
        let level = 7 - current.leading_zeros() as u8;
        let cleared = current & !(1 << level);
        match latch.compare_exchange_weak(current, cleared, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => return Some(level),
            Err(observed) => current = observed,
        }
    }
}
