//! Register map of the memory tester core.
//!
//! All offsets are byte offsets from the instance base address. 64-bit
//! quantities occupy two consecutive words, low word first.

use typestate::ReadPure;
use typestate::ReadWrite;
use typestate::Register;
use typestate::RegisterBus;
use typestate::RegisterPair;
use typestate::WriteOnly;

use crate::Mode;
use crate::Pattern;

pub const START_OFFS: usize = 0x00;
pub const STOP_OFFS: usize = 0x04;
pub const MODE_OFFS: usize = 0x0C;
pub const SIZE_LO_OFFS: usize = 0x10;
pub const SIZE_HI_OFFS: usize = 0x14;
pub const ADDR_LO_OFFS: usize = 0x18;
pub const ADDR_HI_OFFS: usize = 0x1C;
pub const PATTERN_OFFS: usize = 0x20;
pub const STATUS_OFFS: usize = 0x24;
pub const ERRORS_OFFS: usize = 0x28;
pub const FIRST_ERR_LO_OFFS: usize = 0x2C;
pub const FIRST_ERR_HI_OFFS: usize = 0x30;
pub const ITER_OFFS: usize = 0x34;

#[allow(clippy::assertions_on_constants)]
const _: () = assert!(SIZE_HI_OFFS == SIZE_LO_OFFS + 4);
const _: () = assert!(ADDR_HI_OFFS == ADDR_LO_OFFS + 4);
const _: () = assert!(FIRST_ERR_HI_OFFS == FIRST_ERR_LO_OFFS + 4);

/// Value written to the start and stop triggers.
pub(crate) const TRIGGER: u32 = 1;

/// Typed view of one core instance on a bus.
pub(crate) struct MemTestRegisters<'a, B: RegisterBus> {
    bus: &'a B,
    base: usize,
}

impl<'a, B: RegisterBus> MemTestRegisters<'a, B> {
    #[inline]
    pub(crate) const fn new(bus: &'a B, base: usize) -> Self {
        Self { bus, base }
    }

    #[inline]
    const fn at(&self, offset: usize) -> usize {
        self.base + offset
    }

    #[inline]
    pub(crate) fn start(&self) -> Register<'a, B, WriteOnly> {
        Register::new(self.bus, self.at(START_OFFS))
    }

    #[inline]
    pub(crate) fn stop(&self) -> Register<'a, B, WriteOnly> {
        Register::new(self.bus, self.at(STOP_OFFS))
    }

    #[inline]
    pub(crate) fn mode(&self) -> Register<'a, B, ReadWrite, Mode> {
        Register::new(self.bus, self.at(MODE_OFFS))
    }

    #[inline]
    pub(crate) fn size(&self) -> RegisterPair<'a, B, ReadWrite> {
        RegisterPair::new(self.bus, self.at(SIZE_LO_OFFS))
    }

    #[inline]
    pub(crate) fn addr(&self) -> RegisterPair<'a, B, ReadWrite> {
        RegisterPair::new(self.bus, self.at(ADDR_LO_OFFS))
    }

    #[inline]
    pub(crate) fn pattern(&self) -> Register<'a, B, ReadWrite, Pattern> {
        Register::new(self.bus, self.at(PATTERN_OFFS))
    }

    // Raw word: the decode policy for undefined encodings lives in `Status::decode`.
    #[inline]
    pub(crate) fn status(&self) -> Register<'a, B, ReadPure> {
        Register::new(self.bus, self.at(STATUS_OFFS))
    }

    #[inline]
    pub(crate) fn errors(&self) -> Register<'a, B, ReadPure> {
        Register::new(self.bus, self.at(ERRORS_OFFS))
    }

    #[inline]
    pub(crate) fn first_error(&self) -> RegisterPair<'a, B, ReadPure> {
        RegisterPair::new(self.bus, self.at(FIRST_ERR_LO_OFFS))
    }

    #[inline]
    pub(crate) fn iterations(&self) -> Register<'a, B, ReadPure> {
        Register::new(self.bus, self.at(ITER_OFFS))
    }
}
