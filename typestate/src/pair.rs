use crate::RegisterBus;
use crate::read_write::ReadAccess;
use crate::read_write::Readable;
use crate::read_write::Register;
use crate::read_write::WriteAccess;
use crate::read_write::Writable;

/// Splits a 64-bit value into its `(low, high)` 32-bit words.
#[inline]
pub const fn split_u64(value: u64) -> (u32, u32) {
    (value as u32, (value >> 32) as u32)
}

/// Reassembles a 64-bit value from its high and low 32-bit words.
#[inline]
pub const fn join_u64(high: u32, low: u32) -> u64 {
    ((high as u64) << 32) | low as u64
}

/// Two consecutive 32-bit registers holding one 64-bit value.
///
/// The low word lives at the base address and the high word at base + 4.
/// The two accesses are separate bus transactions; a value the hardware
/// updates between them can be observed torn.
pub struct RegisterPair<'a, B: RegisterBus, A> {
    low: Register<'a, B, A>,
    high: Register<'a, B, A>,
}

impl<'a, B: RegisterBus, A> RegisterPair<'a, B, A> {
    #[inline]
    pub const fn new(bus: &'a B, address: usize) -> Self {
        Self {
            low: Register::new(bus, address),
            high: Register::new(bus, address + 4),
        }
    }
}

impl<B: RegisterBus, A: ReadAccess> RegisterPair<'_, B, A> {
    /// Reads the high word, then the low word.
    #[inline]
    pub fn read(&self) -> u64 {
        let high = self.high.read_raw();
        let low = self.low.read_raw();
        join_u64(high, low)
    }
}

impl<B: RegisterBus, A: WriteAccess> RegisterPair<'_, B, A> {
    /// Writes the low word, then the high word.
    #[inline]
    pub fn write(&self, value: u64) {
        let (low, high) = split_u64(value);
        self.low.write_raw(low);
        self.high.write_raw(high);
    }
}
