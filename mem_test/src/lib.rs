#![cfg_attr(not(test), no_std)]
//! Driver for the memory tester IP core.
//!
//! The core writes and reads back a memory region on its own, following a
//! configured [`Mode`] and [`Pattern`], and counts mismatches and completed
//! passes. This crate only translates operations into accesses to the
//! core's register block; all test state lives in the hardware.
//!
//! Mode, pattern and range may only be changed while [`MemTest::get_status`]
//! reads [`Status::Idle`]. The plain setters leave that to the caller;
//! [`MemTest::configure`] checks it once and hands out an [`IdleConfig`].
//!
//! Completion is reported through the status register only and must be
//! polled.

mod config;
mod error;
pub mod regs;
mod types;

pub use config::IdleConfig;
pub use error::MemTestErr;
pub use types::Mode;
pub use types::Pattern;
pub use types::Status;
pub use types::TestConfig;
pub use types::TestRange;
pub use types::TestReport;

use typestate::Mmio;
use typestate::RawReg;
use typestate::Readable;
use typestate::RegisterBus;
use typestate::Writable;

use crate::regs::MemTestRegisters;
use crate::regs::TRIGGER;

/// One memory tester instance: a bus and the base address of its registers.
///
/// Writes take `&mut self`, so an instance has a single owner unless the
/// caller shares it behind a lock.
#[derive(Debug)]
pub struct MemTest<B: RegisterBus> {
    bus: B,
    base: usize,
}

impl MemTest<Mmio> {
    /// # Safety
    /// `base` must be the address of a memory tester register block that
    /// stays mapped for the lifetime of the returned driver.
    pub unsafe fn new_mmio(base: usize) -> Self {
        // Safety: the register block is mapped per the caller's contract.
        Self::new(unsafe { Mmio::new() }, base)
    }
}

impl<B: RegisterBus> MemTest<B> {
    pub const fn new(bus: B, base: usize) -> Self {
        Self { bus, base }
    }

    pub const fn base(&self) -> usize {
        self.base
    }

    pub fn into_inner(self) -> B {
        self.bus
    }

    #[inline]
    fn regs(&self) -> MemTestRegisters<'_, B> {
        MemTestRegisters::new(&self.bus, self.base)
    }

    /// Starts a run. The core clears its error and iteration counters.
    pub fn start(&mut self) {
        log::trace!("mem_test@{:#x}: start", self.base);
        self.regs().start().write(TRIGGER);
    }

    /// Stops a continuous run. Has no effect in the other modes.
    pub fn stop(&mut self) {
        log::trace!("mem_test@{:#x}: stop", self.base);
        self.regs().stop().write(TRIGGER);
    }

    /// Only valid while idle; not checked.
    pub fn set_mode(&mut self, mode: Mode) {
        log::trace!("mem_test@{:#x}: mode {mode}", self.base);
        self.regs().mode().write(mode);
    }

    /// Only valid while idle; not checked.
    pub fn set_pattern(&mut self, pattern: Pattern) {
        log::trace!("mem_test@{:#x}: pattern {pattern}", self.base);
        self.regs().pattern().write(pattern);
    }

    /// Sets the region under test. Only valid while idle; not checked.
    ///
    /// Writes size low/high, then address low/high.
    pub fn set_range(&mut self, start_addr: u64, size: u64) {
        log::trace!(
            "mem_test@{:#x}: range {start_addr:#x} + {size:#x}",
            self.base
        );
        let regs = self.regs();
        regs.size().write(size);
        regs.addr().write(start_addr);
    }

    /// Writes mode, pattern and range in that order. Only valid while idle;
    /// not checked.
    pub fn apply(&mut self, config: &TestConfig) {
        self.set_mode(config.mode);
        self.set_pattern(config.pattern);
        self.set_range(config.range.start_addr, config.range.size);
    }

    /// Returns a handle for configuring the core if it currently reads idle.
    ///
    /// # Errors
    /// [`MemTestErr::NotIdle`] with the observed status otherwise; nothing
    /// is written in that case.
    pub fn configure(&mut self) -> Result<IdleConfig<'_, B>, MemTestErr> {
        let status = self.get_status();
        if status != Status::Idle {
            log::debug!("mem_test@{:#x}: configure refused, {status}", self.base);
            return Err(MemTestErr::NotIdle(status));
        }
        log::debug!("mem_test@{:#x}: configure", self.base);
        Ok(IdleConfig::new(self))
    }

    /// The status register without interpretation.
    pub fn get_raw_status(&self) -> u32 {
        self.regs().status().read_raw()
    }

    /// Decoded status. See [`Status::decode`] for undefined encodings.
    pub fn get_status(&self) -> Status {
        Status::decode(self.get_raw_status())
    }

    pub fn is_idle(&self) -> bool {
        self.get_status() == Status::Idle
    }

    /// Mismatches since the last start.
    pub fn get_errors(&self) -> u32 {
        self.regs().errors().read_raw()
    }

    /// Completed passes since the last start.
    pub fn get_iterations(&self) -> u32 {
        self.regs().iterations().read_raw()
    }

    /// Address of the first mismatch since the last start.
    ///
    /// Reads the high word first. The two reads are not atomic, so a value
    /// latched between them is returned torn.
    pub fn get_first_error_addr(&self) -> u64 {
        self.regs().first_error().read()
    }

    /// # Errors
    /// [`MemTestErr::InvalidMode`] if the register holds an undefined value.
    pub fn get_mode(&self) -> Result<Mode, MemTestErr> {
        let raw = self.regs().mode().read_raw();
        Mode::try_from_raw(raw).ok_or(MemTestErr::InvalidMode(raw))
    }

    /// # Errors
    /// [`MemTestErr::InvalidPattern`] if the register holds an undefined value.
    pub fn get_pattern(&self) -> Result<Pattern, MemTestErr> {
        let raw = self.regs().pattern().read_raw();
        Pattern::try_from_raw(raw).ok_or(MemTestErr::InvalidPattern(raw))
    }

    /// Reads back the configured range, size first.
    pub fn get_range(&self) -> TestRange {
        let regs = self.regs();
        let size = regs.size().read();
        let start_addr = regs.addr().read();
        TestRange { start_addr, size }
    }

    /// Polls the status register until the core is idle.
    ///
    /// Reads the status at most `max_polls` times, spinning between reads.
    /// Any status other than idle or a fault counts as still running.
    ///
    /// # Errors
    /// [`MemTestErr::Fault`] as soon as a fault status is read,
    /// [`MemTestErr::Timeout`] if the core is still not idle after
    /// `max_polls` reads.
    pub fn wait_idle(&self, max_polls: usize) -> Result<Status, MemTestErr> {
        for _ in 0..max_polls {
            let status = self.get_status();
            if status == Status::Idle {
                return Ok(status);
            }
            if status.is_fault() {
                log::warn!("mem_test@{:#x}: {status}", self.base);
                return Err(MemTestErr::Fault(status));
            }
            core::hint::spin_loop();
        }
        log::warn!(
            "mem_test@{:#x}: not idle after {max_polls} polls",
            self.base
        );
        Err(MemTestErr::Timeout { polls: max_polls })
    }

    /// Reads status, error counter and iteration counter, plus the first
    /// error address when the error counter is non-zero.
    pub fn report(&self) -> TestReport {
        let status = self.get_status();
        let errors = self.get_errors();
        let iterations = self.get_iterations();
        let first_error_addr = (errors != 0).then(|| self.get_first_error_addr());
        TestReport {
            status,
            errors,
            iterations,
            first_error_addr,
        }
    }
}
