use core::fmt;

use crate::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemTestErr {
    /// The mode register holds a word that is not a [`crate::Mode`].
    InvalidMode(u32),
    /// The pattern register holds a word that is not a [`crate::Pattern`].
    InvalidPattern(u32),
    /// Configuration was requested while the core was not idle.
    NotIdle(Status),
    /// The core reported a bus or internal fault while being polled.
    Fault(Status),
    /// The core did not become idle within the poll budget.
    Timeout { polls: usize },
}

impl fmt::Display for MemTestErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMode(raw) => write!(f, "invalid mode register value {raw:#x}"),
            Self::InvalidPattern(raw) => write!(f, "invalid pattern register value {raw:#x}"),
            Self::NotIdle(status) => write!(f, "memory tester is not idle (status: {status})"),
            Self::Fault(status) => write!(f, "memory tester stopped on {status}"),
            Self::Timeout { polls } => {
                write!(f, "memory tester still busy after {polls} status polls")
            }
        }
    }
}

impl core::error::Error for MemTestErr {}
