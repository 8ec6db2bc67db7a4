//! Drives `MemTest` against a behavioural model of the core's register block.

use std::cell::Cell;

use mem_test::MemTest;
use mem_test::MemTestErr;
use mem_test::Mode;
use mem_test::Pattern;
use mem_test::Status;
use mem_test::TestConfig;
use mem_test::TestRange;
use mem_test::regs::*;
use typestate::RegisterBus;

const BASE: usize = 0x4000_0000;

/// Register-level model: every status read advances the engine one phase.
#[derive(Default)]
struct SimulatedCore {
    status: Cell<u32>,
    mode: Cell<u32>,
    pattern: Cell<u32>,
    size: [Cell<u32>; 2],
    addr: [Cell<u32>; 2],
    errors: Cell<u32>,
    iterations: Cell<u32>,
    first_err: [Cell<u32>; 2],
    /// Fault to raise on the next status read.
    pending_fault: Cell<Option<u32>>,
    /// Mismatch to report at the end of the next read pass.
    pending_mismatch: Cell<Option<u64>>,
    ignored_writes: Cell<usize>,
}

impl SimulatedCore {
    fn status(&self) -> Status {
        Status::decode(self.status.get())
    }

    fn idle(&self) -> bool {
        self.status() == Status::Idle
    }

    fn start(&self) {
        self.errors.set(0);
        self.iterations.set(0);
        self.first_err[0].set(0);
        self.first_err[1].set(0);
        let first = if self.mode.get() == Mode::ReadOnly as u32 {
            Status::Reading
        } else {
            Status::Writing
        };
        self.status.set(first as u32);
    }

    fn finish_pass(&self) {
        self.iterations.set(self.iterations.get() + 1);
        let next = if self.mode.get() == Mode::Continuous as u32 {
            Status::Writing
        } else {
            Status::Idle
        };
        self.status.set(next as u32);
    }

    fn advance(&self) {
        if let Some(fault) = self.pending_fault.take() {
            self.status.set(fault);
            return;
        }
        match self.status() {
            Status::Writing if self.mode.get() == Mode::WriteOnly as u32 => self.finish_pass(),
            Status::Writing => self.status.set(Status::Reading as u32),
            Status::Reading => {
                if let Some(addr) = self.pending_mismatch.take() {
                    if self.errors.get() == 0 {
                        self.first_err[0].set(addr as u32);
                        self.first_err[1].set((addr >> 32) as u32);
                    }
                    self.errors.set(self.errors.get() + 1);
                }
                self.finish_pass();
            }
            _ => {}
        }
    }

    /// Configuration registers only latch while idle.
    fn config_write(&self, cell: &Cell<u32>, value: u32) {
        if self.idle() {
            cell.set(value);
        } else {
            self.ignored_writes.set(self.ignored_writes.get() + 1);
        }
    }
}

impl RegisterBus for SimulatedCore {
    fn read32(&self, address: usize) -> u32 {
        match address - BASE {
            MODE_OFFS => self.mode.get(),
            PATTERN_OFFS => self.pattern.get(),
            SIZE_LO_OFFS => self.size[0].get(),
            SIZE_HI_OFFS => self.size[1].get(),
            ADDR_LO_OFFS => self.addr[0].get(),
            ADDR_HI_OFFS => self.addr[1].get(),
            STATUS_OFFS => {
                let observed = self.status.get();
                self.advance();
                observed
            }
            ERRORS_OFFS => self.errors.get(),
            ITER_OFFS => self.iterations.get(),
            FIRST_ERR_LO_OFFS => self.first_err[0].get(),
            FIRST_ERR_HI_OFFS => self.first_err[1].get(),
            other => panic!("read of unmapped offset {other:#x}"),
        }
    }

    fn write32(&self, address: usize, value: u32) {
        match address - BASE {
            START_OFFS => {
                assert_eq!(value, 1);
                self.start();
            }
            STOP_OFFS => {
                assert_eq!(value, 1);
                if self.status().is_busy() && self.mode.get() == Mode::Continuous as u32 {
                    self.status.set(Status::Idle as u32);
                }
            }
            MODE_OFFS => self.config_write(&self.mode, value),
            PATTERN_OFFS => self.config_write(&self.pattern, value),
            SIZE_LO_OFFS => self.config_write(&self.size[0], value),
            SIZE_HI_OFFS => self.config_write(&self.size[1], value),
            ADDR_LO_OFFS => self.config_write(&self.addr[0], value),
            ADDR_HI_OFFS => self.config_write(&self.addr[1], value),
            other => panic!("write to read-only or unmapped offset {other:#x}"),
        }
    }
}

#[test]
fn single_run_completes_one_pass() {
    let core = SimulatedCore::default();
    let mut mt = MemTest::new(&core, BASE);

    mt.configure()
        .unwrap()
        .apply(&TestConfig::new(
            Mode::Single,
            Pattern::Prbn,
            TestRange::new(0x8000_0000, 0x1000_0000),
        ))
        .set_pattern(Pattern::Walk1);
    assert_eq!(mt.get_pattern(), Ok(Pattern::Walk1));
    assert_eq!(mt.get_range(), TestRange::new(0x8000_0000, 0x1000_0000));

    mt.configure().unwrap().start();
    assert_eq!(mt.wait_idle(16), Ok(Status::Idle));

    let report = mt.report();
    assert_eq!(report.status, Status::Idle);
    assert_eq!(report.iterations, 1);
    assert_eq!(report.errors, 0);
    assert_eq!(report.first_error_addr, None);
}

#[test]
fn write_only_skips_read_pass() {
    let core = SimulatedCore::default();
    let mut mt = MemTest::new(&core, BASE);
    mt.set_mode(Mode::WriteOnly);
    mt.start();

    assert_eq!(mt.get_status(), Status::Writing);
    assert_eq!(mt.get_status(), Status::Idle);
    assert_eq!(mt.get_iterations(), 1);
}

#[test]
fn read_only_starts_in_reading() {
    let core = SimulatedCore::default();
    let mut mt = MemTest::new(&core, BASE);
    mt.set_mode(Mode::ReadOnly);
    mt.start();

    assert_eq!(mt.get_status(), Status::Reading);
    assert!(mt.is_idle());
}

#[test]
fn continuous_run_needs_stop() {
    let core = SimulatedCore::default();
    let mut mt = MemTest::new(&core, BASE);
    mt.set_mode(Mode::Continuous);
    mt.start();

    assert_eq!(mt.wait_idle(8), Err(MemTestErr::Timeout { polls: 8 }));
    assert_eq!(mt.get_iterations(), 4);

    mt.stop();
    assert_eq!(mt.wait_idle(1), Ok(Status::Idle));
}

#[test]
fn configuration_while_busy() {
    let core = SimulatedCore::default();
    let mut mt = MemTest::new(&core, BASE);
    mt.set_range(0x1000, 0x100);
    mt.start();

    assert_eq!(mt.configure().err(), Some(MemTestErr::NotIdle(Status::Writing)));

    // The unchecked setter still issues the writes; the core drops them.
    mt.set_range(0x2000, 0x200);
    assert_eq!(core.ignored_writes.get(), 4);
    assert_eq!(mt.get_range(), TestRange::new(0x1000, 0x100));
}

#[test]
fn mismatch_latches_first_error_address() {
    let core = SimulatedCore::default();
    let mut mt = MemTest::new(&core, BASE);
    mt.set_mode(Mode::Continuous);
    mt.start();

    core.pending_mismatch.set(Some(0x0000_0001_2345_6780));
    // Writing -> Reading -> (mismatch) Writing -> Reading -> (mismatch) Writing
    for _ in 0..2 {
        mt.get_status();
    }
    core.pending_mismatch.set(Some(0x0000_0002_0000_0000));
    for _ in 0..2 {
        mt.get_status();
    }

    let report = mt.report();
    assert_eq!(report.errors, 2);
    assert_eq!(report.first_error_addr, Some(0x0000_0001_2345_6780));

    mt.stop();
    mt.start();
    assert_eq!(mt.get_errors(), 0);
    assert_eq!(mt.get_iterations(), 0);
    assert_eq!(mt.get_first_error_addr(), 0);
}

#[test]
fn fault_is_sticky_until_start() {
    let core = SimulatedCore::default();
    let mut mt = MemTest::new(&core, BASE);
    mt.start();

    core.pending_fault.set(Some(Status::AxiErr as u32));
    assert_eq!(mt.get_status(), Status::Writing);
    assert_eq!(mt.wait_idle(4), Err(MemTestErr::Fault(Status::AxiErr)));
    assert_eq!(mt.get_status(), Status::AxiErr);
    assert!(mt.configure().is_err());

    mt.start();
    assert_eq!(mt.wait_idle(4), Ok(Status::Idle));
}

#[test]
fn reserved_status_reads_unknown() {
    let core = SimulatedCore::default();
    let mt = MemTest::new(&core, BASE);
    core.status.set(5);

    assert_eq!(mt.get_raw_status(), 5);
    assert_eq!(mt.get_status(), Status::Unknown);
    assert_eq!(mt.wait_idle(2), Err(MemTestErr::Timeout { polls: 2 }));
}
