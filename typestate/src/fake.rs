//! In-memory bus for exercising drivers without hardware.
//!
//! [`FakeBus`] keeps a small register file and an ordered log of every
//! access. Both live in fixed-capacity `heapless` storage so the fake works
//! on targets without an allocator.

use core::cell::Cell;
use core::cell::RefCell;

use heapless::Vec;

use crate::RegisterBus;

/// One recorded bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(usize),
    Write(usize, u32),
}

/// Register file plus access log, each holding at most `N` entries.
///
/// Reads of an address never written or preloaded return 0. Once either
/// store is full further entries are dropped and [`FakeBus::overflowed`]
/// reports it.
#[derive(Debug, Default)]
pub struct FakeBus<const N: usize> {
    registers: RefCell<Vec<(usize, u32), N>>,
    log: RefCell<Vec<Access, N>>,
    overflowed: Cell<bool>,
}

impl<const N: usize> FakeBus<N> {
    pub const fn new() -> Self {
        Self {
            registers: RefCell::new(Vec::new()),
            log: RefCell::new(Vec::new()),
            overflowed: Cell::new(false),
        }
    }

    /// Sets a register value without recording an access.
    pub fn preload(&self, address: usize, value: u32) {
        self.store(address, value);
    }

    /// Current content of a register, without recording an access.
    pub fn register(&self, address: usize) -> Option<u32> {
        self.registers
            .borrow()
            .iter()
            .find(|(a, _)| *a == address)
            .map(|&(_, v)| v)
    }

    /// Every access since creation or the last [`FakeBus::clear_log`].
    pub fn accesses(&self) -> Vec<Access, N> {
        self.log.borrow().clone()
    }

    /// Only the writes, in order.
    pub fn writes(&self) -> Vec<(usize, u32), N> {
        self.log
            .borrow()
            .iter()
            .filter_map(|access| match *access {
                Access::Write(address, value) => Some((address, value)),
                Access::Read(_) => None,
            })
            .collect()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed.get()
    }

    fn record(&self, access: Access) {
        if self.log.borrow_mut().push(access).is_err() {
            self.overflowed.set(true);
        }
    }

    fn store(&self, address: usize, value: u32) {
        let mut registers = self.registers.borrow_mut();
        if let Some(slot) = registers.iter_mut().find(|(a, _)| *a == address) {
            slot.1 = value;
        } else if registers.push((address, value)).is_err() {
            self.overflowed.set(true);
        }
    }
}

impl<const N: usize> RegisterBus for FakeBus<N> {
    fn read32(&self, address: usize) -> u32 {
        self.record(Access::Read(address));
        self.register(address).unwrap_or(0)
    }

    fn write32(&self, address: usize, value: u32) {
        self.record(Access::Write(address, value));
        self.store(address, value);
    }
}
