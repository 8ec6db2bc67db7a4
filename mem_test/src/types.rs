use core::fmt;

use typestate::RawReg;
use typestate_macro::RawReg;

/// Test mode, register 0x0C.
#[repr(u32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, RawReg)]
pub enum Mode {
    /// One write pass followed by one read pass.
    #[default]
    Single = 0,
    /// Write/read passes repeat until stopped.
    Continuous = 1,
    /// Write pass only.
    WriteOnly = 2,
    /// Read pass only, checking data left by an earlier write.
    ReadOnly = 3,
}

/// Data pattern, register 0x20.
#[repr(u32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, RawReg)]
pub enum Pattern {
    /// Incrementing counter.
    #[default]
    Count = 0,
    /// Walking one.
    Walk1 = 1,
    /// Each word holds its own address.
    OwnAddr = 2,
    /// Pseudo-random binary noise.
    Prbn = 3,
}

/// Core status, register 0x24. Encodings 4 and 5 are reserved.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, RawReg)]
pub enum Status {
    Idle = 0,
    Writing = 1,
    Reading = 2,
    /// Bus error; sticky until the next start.
    AxiErr = 3,
    /// Internal error; sticky until the next start.
    IntErr = 6,
    Unknown = 7,
}

impl Status {
    /// Decodes a raw status word. Words with no defined member (the
    /// reserved 4 and 5, and anything above 7) read as [`Status::Unknown`].
    pub fn decode(raw: u32) -> Self {
        Self::try_from_raw(raw).unwrap_or_else(|| {
            log::warn!("mem_test: undefined status word {raw:#x}, reporting Unknown");
            Self::Unknown
        })
    }

    /// A test pass is in progress.
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Writing | Self::Reading)
    }

    /// The core stopped on a bus or internal fault.
    pub const fn is_fault(self) -> bool {
        matches!(self, Self::AxiErr | Self::IntErr)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Continuous => "continuous",
            Self::WriteOnly => "write-only",
            Self::ReadOnly => "read-only",
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Count => "count",
            Self::Walk1 => "walk1",
            Self::OwnAddr => "own-address",
            Self::Prbn => "prbn",
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Writing => "writing",
            Self::Reading => "reading",
            Self::AxiErr => "AXI error",
            Self::IntErr => "internal error",
            Self::Unknown => "unknown",
        })
    }
}

/// Region exercised by the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TestRange {
    pub start_addr: u64,
    pub size: u64,
}

impl TestRange {
    pub const fn new(start_addr: u64, size: u64) -> Self {
        Self { start_addr, size }
    }

    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Everything that must be set while the core is idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TestConfig {
    pub mode: Mode,
    pub pattern: Pattern,
    pub range: TestRange,
}

impl TestConfig {
    pub const fn new(mode: Mode, pattern: Pattern, range: TestRange) -> Self {
        Self {
            mode,
            pattern,
            range,
        }
    }
}

/// Snapshot of the status and counter registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestReport {
    pub status: Status,
    pub errors: u32,
    pub iterations: u32,
    /// Only latched by the core when `errors` is non-zero.
    pub first_error_addr: Option<u64>,
}

impl TestReport {
    pub const fn has_errors(&self) -> bool {
        self.errors != 0
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status: {}, iterations: {}, errors: {}",
            self.status, self.iterations, self.errors
        )?;
        if let Some(addr) = self.first_error_addr {
            write!(f, ", first error at {addr:#018x}")?;
        }
        Ok(())
    }
}
